#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Browse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Sidebar,
    Table,
    Editor,
}

impl Panel {
    fn cycle(editor_visible: bool) -> &'static [Panel] {
        if editor_visible {
            &[Panel::Sidebar, Panel::Table, Panel::Editor]
        } else {
            &[Panel::Sidebar, Panel::Table]
        }
    }

    /// Next visible panel; the editor only takes part while it is shown.
    pub fn next(self, editor_visible: bool) -> Panel {
        let panels = Self::cycle(editor_visible);
        let idx = panels.iter().position(|p| *p == self).unwrap_or(0);
        panels[(idx + 1) % panels.len()]
    }

    pub fn prev(self, editor_visible: bool) -> Panel {
        let panels = Self::cycle(editor_visible);
        let idx = panels.iter().position(|p| *p == self).unwrap_or(0);
        panels[(idx + panels.len() - 1) % panels.len()]
    }
}
