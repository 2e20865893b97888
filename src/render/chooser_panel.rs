// Chooser Panel View
// Renders the column chooser popup over the grid

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::chooser::ColumnChooser;
use crate::core::chooser_config::PanelPosition;
use crate::ui::Styles;
use crate::utilities::{center_text, clip_text};

/// Render the chooser popup, if it is open
pub fn render_chooser(f: &mut Frame, chooser: &ColumnChooser, area: Rect) {
    if !chooser.is_column_chooser_visible() {
        return;
    }

    let config = chooser.config();
    let panel = anchored_rect(config.position, config.width, config.height, area);

    f.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_focused())
        .title(Span::styled(config.title.clone(), Styles::title_focused()));
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let Some(tree) = chooser.tree() else {
        return;
    };

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    if config.search.enabled {
        let value = tree.search_value();
        let text = if value.is_empty() && !chooser.is_search_focused() {
            format!("/ {}", tree.config().search_editor.placeholder)
        } else {
            format!("/ {value}")
        };
        let style = if chooser.is_search_focused() {
            Styles::search_focused()
        } else {
            Styles::search_blurred()
        };
        lines.push(Line::styled(clip_text(&text, width), style));
    }

    let rows = tree.visible_rows();

    if chooser.is_select_mode() && config.selection.allow_select_all {
        let state = if rows.is_empty() || rows.iter().any(|row| row.selected != Some(true)) {
            if rows.iter().all(|row| row.selected == Some(false)) {
                Some(false)
            } else {
                None
            }
        } else {
            Some(true)
        };
        let text = format!("{} (Select All)", checkbox(state));
        lines.push(Line::styled(clip_text(&text, width), Styles::list_normal()));
    }

    if rows.is_empty() {
        lines.push(Line::styled(
            center_text(&config.empty_panel_text, width),
            Styles::list_disabled(),
        ));
    } else {
        let cursor = tree.cursor();

        for (idx, row) in rows.iter().enumerate().skip(tree.scroll_top() as usize) {
            let mut text = "  ".repeat(row.depth);
            if row.has_children {
                text.push_str(if row.expanded { "▾ " } else { "▸ " });
            }
            if chooser.is_select_mode() {
                text.push_str(checkbox(row.selected));
                text.push(' ');
            }
            text.push_str(&row.label);

            let style = if idx == cursor {
                Styles::list_selected_focused()
            } else if row.disabled {
                Styles::list_disabled()
            } else {
                Styles::list_normal()
            };
            lines.push(Line::styled(clip_text(&text, width), style));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn checkbox(selected: Option<bool>) -> &'static str {
    match selected {
        Some(true) => "[x]",
        Some(false) => "[ ]",
        None => "[-]",
    }
}

/// Place a `width` x `height` popup inside `area` at the configured anchor
pub fn anchored_rect(position: PanelPosition, width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let (x, y) = match position {
        PanelPosition::TopLeft => (area.x, area.y),
        PanelPosition::TopRight => (area.x + area.width - width, area.y),
        PanelPosition::BottomLeft => (area.x, area.y + area.height - height),
        PanelPosition::BottomRight => {
            (area.x + area.width - width, area.y + area.height - height)
        }
        PanelPosition::Center => (
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
        ),
    };

    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn test_anchor_corners() {
        let top_left = anchored_rect(PanelPosition::TopLeft, 30, 10, SCREEN);
        assert_eq!((top_left.x, top_left.y), (0, 0));

        let bottom_right = anchored_rect(PanelPosition::BottomRight, 30, 10, SCREEN);
        assert_eq!((bottom_right.x, bottom_right.y), (50, 14));
    }

    #[test]
    fn test_anchor_center() {
        let center = anchored_rect(PanelPosition::Center, 30, 10, SCREEN);
        assert_eq!((center.x, center.y), (25, 7));
    }

    #[test]
    fn test_panel_clamped_to_screen() {
        let small = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 8,
        };
        let panel = anchored_rect(PanelPosition::BottomRight, 34, 16, small);

        assert_eq!((panel.width, panel.height), (20, 8));
        assert_eq!((panel.x, panel.y), (0, 0));
    }

    #[test]
    fn test_checkbox_glyphs() {
        assert_eq!(checkbox(Some(true)), "[x]");
        assert_eq!(checkbox(Some(false)), "[ ]");
        assert_eq!(checkbox(None), "[-]");
    }
}
