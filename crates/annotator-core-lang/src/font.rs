//! Font alias table.

/// Courier New font family.
pub const COURIER_NEW: &str = "Courier New";
/// Consolas font family.
pub const CONSOLAS: &str = "Consolas";

/// Directive aliases (`#font=<alias>`) and the font families they select.
pub const FONT_ALIASES: &[(&str, &str)] = &[("courier_new", COURIER_NEW), ("consolas", CONSOLAS)];
