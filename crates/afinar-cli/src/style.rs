use console::style;

pub const HELP_TEMPLATE: &str = r#"
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading}
{tab}{usage}

{all-args}{after-help}
"#;

/// Theme for styled terminal output
#[derive(Clone)]
pub struct Theme {
    pub accent: fn(&str) -> console::StyledObject<&str>,
    pub success: fn(&str) -> console::StyledObject<&str>,
    pub error: fn(&str) -> console::StyledObject<&str>,
    pub info: fn(&str) -> console::StyledObject<&str>,
    pub muted: fn(&str) -> console::StyledObject<&str>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: |s| style(s).cyan().bold(),
            success: |s| style(s).green().bold(),
            error: |s| style(s).red().bold(),
            info: |s| style(s).blue(),
            muted: |s| style(s).dim(),
        }
    }
}

impl Theme {
    pub fn no_color() -> Self {
        Self {
            accent: |s| style(s),
            success: |s| style(s),
            error: |s| style(s),
            info: |s| style(s),
            muted: |s| style(s),
        }
    }

    pub fn success(&self, msg: &str) {
        println!("{} {}", (self.success)("✓"), msg);
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", (self.error)("✗"), msg);
    }

    pub fn info(&self, msg: &str) {
        println!("{} {}", (self.info)("ℹ"), msg);
    }
}
