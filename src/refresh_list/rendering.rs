//! Rendering for the refresh list.

use lipgloss_extras::prelude::*;

use super::model::Heights;
use super::Model;
use crate::container::{fit_width, ItemAnimator};
use crate::row::{RowProvider, RowType};

/// Styles for the rows and the refresh indicator.
#[derive(Debug, Clone)]
pub struct RefreshListStyles {
    /// Item rows.
    pub item: Style,
    /// The item row under the cursor while focused.
    pub selected_item: Style,
    /// The load-more footer row.
    pub footer: Style,
    /// The empty row.
    pub empty: Style,
    /// The pull-to-refresh indicator line.
    pub indicator: Style,
}

impl Default for RefreshListStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        Self {
            item: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            selected_item: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#EE6FF8",
                    Dark: "#EE6FF8",
                })
                .bold(true),
            footer: Style::new().foreground(subdued_color.clone()).italic(true),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            indicator: Style::new().foreground(subdued_color),
        }
    }
}

impl<P: RowProvider> Model<P> {
    /// Renders the indicator line followed by the visible rows, cut to the
    /// list's size.
    pub(super) fn render(&self) -> String {
        let width = self.container.width();
        let height = self.container.height();
        let mut lines: Vec<String> = Vec::new();

        let indicator = self.pull.view();
        if !indicator.is_empty() {
            lines.push(self.styles.indicator.render(&fit_width(&indicator, width)));
        }

        if let Some(adapter) = self.adapter.as_ref() {
            let heights = Heights::of(&self.adapter, &self.container);
            let decoration = self.container.item_decoration();
            for position in self.container.visible_rows(&heights) {
                let Ok(holder) = adapter.holder_at(position) else {
                    continue;
                };
                if !holder.is_visible() {
                    continue;
                }
                let style = match holder.row_type() {
                    RowType::Footer => &self.styles.footer,
                    RowType::Empty => &self.styles.empty,
                    RowType::Item(_) if self.focus && position == self.cursor => {
                        &self.styles.selected_item
                    }
                    RowType::Item(_) if self.container.is_highlighted(position) => {
                        match self.container.item_animator() {
                            ItemAnimator::Highlight { style, .. } => style,
                            ItemAnimator::None => &self.styles.item,
                        }
                    }
                    RowType::Item(_) => &self.styles.item,
                };
                for line in holder.lines() {
                    lines.push(style.render(&fit_width(line, width)));
                }
                if let (RowType::Item(_), Some(decoration)) = (holder.row_type(), decoration) {
                    lines.push(decoration.render(width));
                }
            }
        }

        if height > 0 {
            lines.truncate(height);
        }
        lines.join("\n")
    }
}
