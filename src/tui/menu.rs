//! Navigation menu state.
//!
//! The menu is a side panel with an `active` flag and two header icons: the
//! "open menu" glyph shows while the panel is closed, the "close" glyph while
//! it is open. Exactly one of the two is visible at any time.

/// Display state of a header icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Inline,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Inline
    }
}

/// Body views reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chart,
    Table,
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Chart, View::Table, View::About];

    pub fn label(self) -> &'static str {
        match self {
            View::Chart => "Chart",
            View::Table => "Table",
            View::About => "About",
        }
    }
}

pub const MENU_ICON: &str = "☰";
pub const CLOSE_ICON: &str = "✕";

#[derive(Debug, Clone)]
pub struct NavMenu {
    active: bool,
    menu_icon: Visibility,
    close_icon: Visibility,
    cursor: usize,
}

impl Default for NavMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl NavMenu {
    pub fn new() -> Self {
        Self {
            active: false,
            menu_icon: Visibility::Inline,
            close_icon: Visibility::Hidden,
            cursor: 0,
        }
    }

    /// Flip the panel and recompute the icons from the resulting state.
    pub fn toggle(&mut self) {
        self.active = !self.active;
        let open = self.active;
        self.menu_icon = if open { Visibility::Hidden } else { Visibility::Inline };
        self.close_icon = if open { Visibility::Inline } else { Visibility::Hidden };
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn menu_icon(&self) -> Visibility {
        self.menu_icon
    }

    pub fn close_icon(&self) -> Visibility {
        self.close_icon
    }

    /// The glyph currently shown in the header.
    pub fn icon(&self) -> &'static str {
        if self.close_icon.is_visible() { CLOSE_ICON } else { MENU_ICON }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.cursor = (self.cursor + 1).min(View::ALL.len() - 1);
    }

    pub fn selected(&self) -> View {
        View::ALL[self.cursor]
    }
}
