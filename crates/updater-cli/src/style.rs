use console::Style;

pub fn error_prefix() -> String {
    Style::new().red().bold().apply_to("error:").to_string()
}

pub fn warning_prefix() -> String {
    Style::new().yellow().bold().apply_to("warning:").to_string()
}

pub fn dim(s: &str) -> String {
    Style::new().dim().apply_to(s).to_string()
}
