use nu_ansi_term::{Color, Style};
use std::io::IsTerminal;

/// Width of the `=` divider drawn around file headers and before the summary.
pub const DIVIDER_WIDTH: usize = 80;

/// When to emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves `Auto` against the terminal and `NO_COLOR`.
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
                !no_color && std::io::stdout().is_terminal()
            }
        }
    }
}

/// Styles for the structural lines of the report. Diagnostic text itself is
/// never painted.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub file: Style,
    pub errors: Style,
    pub warnings: Style,
    pub divider: Style,
}

impl Palette {
    pub fn colored() -> Self {
        Palette {
            file: Color::Cyan.bold(),
            errors: Color::Red.bold(),
            warnings: Color::Yellow.bold(),
            divider: Color::White.dimmed(),
        }
    }

    pub fn plain() -> Self {
        Palette {
            file: Style::new(),
            errors: Style::new(),
            warnings: Style::new(),
            divider: Style::new(),
        }
    }

    pub fn for_choice(choice: ColorChoice) -> Self {
        if choice.enabled() {
            Palette::colored()
        } else {
            Palette::plain()
        }
    }

    pub fn divider(&self) -> String {
        self.divider.paint("=".repeat(DIVIDER_WIDTH)).to_string()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::plain()
    }
}
