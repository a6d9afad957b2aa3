//! Glyph sets for prompt decorations

/// Glyphs drawn around and inside prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub step_active: &'static str,
    pub step_submit: &'static str,
    pub step_cancel: &'static str,
    pub step_error: &'static str,
    pub bar_start: &'static str,
    pub bar: &'static str,
    pub bar_end: &'static str,
    pub pointer: &'static str,
    pub radio_active: &'static str,
    pub radio_inactive: &'static str,
    pub checkbox_active: &'static str,
    pub checkbox_selected: &'static str,
    pub checkbox_inactive: &'static str,
    pub password_mask: char,
    pub info: &'static str,
    pub success: &'static str,
    pub warn: &'static str,
    pub error: &'static str,
    pub progress_light: char,
    pub progress_heavy: char,
    pub progress_block: char,
}

impl Symbols {
    pub const UNICODE: Symbols = Symbols {
        step_active: "◆",
        step_submit: "◇",
        step_cancel: "■",
        step_error: "▲",
        bar_start: "┌",
        bar: "│",
        bar_end: "└",
        pointer: "›",
        radio_active: "●",
        radio_inactive: "○",
        checkbox_active: "◻",
        checkbox_selected: "◼",
        checkbox_inactive: "◻",
        password_mask: '▪',
        info: "●",
        success: "◆",
        warn: "▲",
        error: "■",
        progress_light: '─',
        progress_heavy: '━',
        progress_block: '█',
    };

    pub const ASCII: Symbols = Symbols {
        step_active: "*",
        step_submit: "o",
        step_cancel: "x",
        step_error: "x",
        bar_start: "T",
        bar: "|",
        bar_end: "-",
        pointer: ">",
        radio_active: "(*)",
        radio_inactive: "( )",
        checkbox_active: "[.]",
        checkbox_selected: "[+]",
        checkbox_inactive: "[ ]",
        password_mask: '*',
        info: "*",
        success: "*",
        warn: "!",
        error: "x",
        progress_light: '-',
        progress_heavy: '=',
        progress_block: '#',
    };

    pub fn new(unicode: bool) -> Self {
        if unicode {
            Self::UNICODE
        } else {
            Self::ASCII
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::UNICODE
    }
}
