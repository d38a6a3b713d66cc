//! Color validation
//!
//! Accepted forms:
//! - hex: `#rgb`, `#rrggbb`
//! - functional: `rgb(...)`, `rgba(...)`, `hsl(...)`, `hsla(...)`,
//!   `hsv(...)`, `hsva(...)`
//! - CSS color names, case-insensitive
//!
//! The received string is stored as given.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{describe_value, each_element, Rejection};

static HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

static FUNCTIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(rgb|hsl|hsv)a?\([\d.]+%?(,[\d.]+%?){2,3}\)$").unwrap()
});

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgrey", "darkgreen", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "grey", "green", "greenyellow", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgrey", "lightgreen",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "red", "rosybrown", "royalblue", "rebeccapurple",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen", "transparent",
];

/// Whether `s` is a color string in any accepted form
pub fn is_color(s: &str) -> bool {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let lower = compact.to_ascii_lowercase();
    HEX.is_match(&compact) || FUNCTIONAL.is_match(&lower) || NAMED_COLORS.contains(&lower.as_str())
}

/// Rules for a color field
#[derive(Debug, Clone, Default)]
pub struct ColorRules {
    array_ok: bool,
}

impl ColorRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn array_ok(mut self) -> Self {
        self.array_ok = true;
        self
    }

    pub(crate) fn coerce(&self, value: Value) -> Result<Value, Rejection> {
        each_element(value, self.array_ok, |v| match v.as_str() {
            Some(s) if is_color(s) => Ok(v),
            _ => Err(Rejection::new(format!(
                "received {}, expected a hex string, an rgb/rgba/hsl/hsla/hsv/hsva string, or a named CSS color",
                describe_value(&v)
            ))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hex_colors() {
        assert!(is_color("#fff"));
        assert!(is_color("#A0B1C2"));
        assert!(!is_color("#abcd"));
        assert!(!is_color("#ggg"));
    }

    #[test]
    fn test_functional_colors() {
        assert!(is_color("rgb(255, 0, 0)"));
        assert!(is_color("rgba(255,0,0,0.5)"));
        assert!(is_color("hsl(120, 100%, 50%)"));
        assert!(is_color("HSVA(0,0%,0%,1)"));
        assert!(!is_color("rgb(1,2)"));
        assert!(!is_color("cmyk(1,2,3,4)"));
    }

    #[test]
    fn test_named_colors() {
        assert!(is_color("rebeccapurple"));
        assert!(is_color(" Red "));
        assert!(!is_color("reddish"));
    }

    #[test]
    fn test_value_kept_verbatim() {
        let rules = ColorRules::new();
        assert_eq!(rules.coerce(json!(" Red ")).unwrap(), json!(" Red "));
        assert!(rules.coerce(json!(3)).is_err());
    }

    #[test]
    fn test_array_ok() {
        let rules = ColorRules::new().array_ok();
        assert!(rules.coerce(json!(["red", "#000"])).is_ok());
        assert!(rules.coerce(json!(["red", "nope"])).is_err());
    }
}
