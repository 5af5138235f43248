/// Glyphs for row icons, with ASCII fallbacks

use phf::phf_map;

static ICONS: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "update" => ("⟳", "@"),
    "channel" => ("≡", "="),
    "link" => ("↗", "^"),
    "theme" => ("◐", "*"),
    "unicode" => ("Ω", "U"),
    "clock" => ("◷", "T"),
    "log" => ("☰", "L"),
    "file" => ("▤", "F"),
};

pub fn icon_glyph(icon: &str, use_unicode: bool) -> &'static str {
    match ICONS.get(icon) {
        Some(&(glyph, ascii)) => {
            if use_unicode {
                glyph
            } else {
                ascii
            }
        }
        None if use_unicode => "•",
        None => "*",
    }
}
