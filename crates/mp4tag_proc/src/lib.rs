//! Procedural macros generating the repetitive tag accessor families. Every macro takes the
//! accessor name and the display string of the atom identifier:
//!
//! ```ignore
//! individual_string_value_accessor!("album", "©alb");
//! ```
//!
//! The referenced identifier constant is derived from the accessor name by uppercasing it.
use proc_macro::TokenStream;

struct Input {
    /// The accessor function name.
    ident: String,
    /// The accessor name with underscores replaced by spaces.
    name: String,
    /// The name with the first letter capitalized.
    headline: String,
    /// The path of the identifier constant.
    atom_ident: String,
    /// The display string of the atom identifier.
    atom_ident_string: String,
}

fn parse_input(input: TokenStream) -> Input {
    let str = input.to_string();
    let mut token_strings = str.split(',');

    let ident = token_strings
        .next()
        .expect("Expected function ident")
        .trim()
        .replace('"', "");
    let atom_ident_string = token_strings
        .next()
        .expect("Expected atom ident string")
        .trim()
        .replace('"', "");

    let name = ident.replace('_', " ");
    let mut name_chars = name.chars();
    let headline = match name_chars.next() {
        Some(c) => format!("{}{}", c.to_uppercase(), name_chars.collect::<String>()),
        None => panic!("Expected non-empty function ident"),
    };
    let atom_ident = format!("crate::atom::ident::{}", ident.to_uppercase());

    Input { ident, name, headline, atom_ident, atom_ident_string }
}

fn pluralize(name: &str) -> String {
    match name.strip_suffix('y') {
        Some(stem) => format!("{stem}ies"),
        None => format!("{name}s"),
    }
}

/// Generates getter, setter and remover for a single utf-8 string value. Setting an empty string
/// removes the atom.
#[proc_macro]
pub fn individual_string_value_accessor(input: TokenStream) -> TokenStream {
    let Input { ident, name, headline, atom_ident, atom_ident_string } = parse_input(input);

    format!(
        "
/// ### {headline}
impl Tag {{
    /// Returns the {name} (`{atom_ident_string}`).
    pub fn {ident}(&self) -> Option<&str> {{
        self.strings_of(&{atom_ident}).next()
    }}

    /// Sets the {name} (`{atom_ident_string}`). An empty value removes the atom.
    pub fn set_{ident}(&mut self, {ident}: impl Into<String>) {{
        let value = {ident}.into();
        if value.is_empty() {{
            self.remove_data(&{atom_ident});
        }} else {{
            self.set_data({atom_ident}, crate::Data::Utf8(value));
        }}
    }}

    /// Removes the {name} (`{atom_ident_string}`).
    pub fn remove_{ident}(&mut self) {{
        self.remove_data(&{atom_ident});
    }}
}}
    "
    )
    .parse()
    .unwrap()
}

/// Generates accessors for a multi valued string field. The values are stored in one atom,
/// joined by `\"; \"`, readers split at semicolons and trim the parts. Setting an empty list
/// removes the atom.
#[proc_macro]
pub fn multiple_string_values_accessor(input: TokenStream) -> TokenStream {
    let Input { ident, name, headline, atom_ident, atom_ident_string } = parse_input(input);

    let ident_plural = pluralize(&ident);
    let name_plural = pluralize(&name);
    let headline_plural = pluralize(&headline);

    format!(
        "
/// ### {headline_plural}
impl Tag {{
    /// Returns all {name_plural} (`{atom_ident_string}`), the stored value split at semicolons
    /// with surrounding whitespace trimmed.
    pub fn {ident_plural}(&self) -> impl Iterator<Item = &str> {{
        self.strings_of(&{atom_ident})
            .flat_map(|s| s.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }}

    /// Returns the first {name} (`{atom_ident_string}`).
    pub fn {ident}(&self) -> Option<&str> {{
        self.{ident_plural}().next()
    }}

    /// Sets all {name_plural} (`{atom_ident_string}`), joined by `\"; \"`. An empty list
    /// removes the atom.
    pub fn set_{ident_plural}<S: AsRef<str>>(&mut self, {ident_plural}: &[S]) {{
        let value = {ident_plural}
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join(\"; \");
        if value.is_empty() {{
            self.remove_data(&{atom_ident});
        }} else {{
            self.set_data({atom_ident}, crate::Data::Utf8(value));
        }}
    }}

    /// Sets one {name} (`{atom_ident_string}`). An empty value removes the atom.
    pub fn set_{ident}(&mut self, {ident}: impl Into<String>) {{
        let value = {ident}.into();
        if value.trim().is_empty() {{
            self.remove_data(&{atom_ident});
        }} else {{
            self.set_data({atom_ident}, crate::Data::Utf8(value));
        }}
    }}

    /// Removes all {name_plural} (`{atom_ident_string}`).
    pub fn remove_{ident_plural}(&mut self) {{
        self.remove_data(&{atom_ident});
    }}
}}
    "
    )
    .parse()
    .unwrap()
}

/// Generates accessors for a flag value: a single byte that is nonzero when the flag is set,
/// written with the historical iTunes type code 21.
#[proc_macro]
pub fn flag_value_accessor(input: TokenStream) -> TokenStream {
    let Input { ident, name, headline, atom_ident, atom_ident_string } = parse_input(input);

    format!(
        "
/// ### {headline}
impl Tag {{
    /// Returns whether the {name} flag is set (`{atom_ident_string}`).
    pub fn {ident}(&self) -> bool {{
        self.bytes_of(&{atom_ident}).next().map_or(false, |v| v.iter().any(|b| *b != 0))
    }}

    /// Sets the {name} flag (`{atom_ident_string}`).
    pub fn set_{ident}(&mut self) {{
        self.set_data({atom_ident}, crate::Data::BeSigned(vec![1u8]));
    }}

    /// Removes the {name} flag (`{atom_ident_string}`).
    pub fn remove_{ident}(&mut self) {{
        self.remove_data(&{atom_ident});
    }}
}}
    "
    )
    .parse()
    .unwrap()
}

/// Generates accessors for a 16 bit big endian integer value.
#[proc_macro]
pub fn integer_value_accessor(input: TokenStream) -> TokenStream {
    let Input { ident, name, headline, atom_ident, atom_ident_string } = parse_input(input);

    format!(
        "
/// ### {headline}
impl Tag {{
    /// Returns the {name} (`{atom_ident_string}`).
    pub fn {ident}(&self) -> Option<u16> {{
        let vec = self.bytes_of(&{atom_ident}).next()?;
        if vec.len() < 2 {{
            return None;
        }}
        Some(u16::from_be_bytes([vec[0], vec[1]]))
    }}

    /// Sets the {name} (`{atom_ident_string}`).
    pub fn set_{ident}(&mut self, {ident}: u16) {{
        self.set_data({atom_ident}, crate::Data::BeSigned({ident}.to_be_bytes().to_vec()));
    }}

    /// Removes the {name} (`{atom_ident_string}`).
    pub fn remove_{ident}(&mut self) {{
        self.remove_data(&{atom_ident});
    }}
}}
    "
    )
    .parse()
    .unwrap()
}

/// Generates getter, setter and remover for a single string value stored in a freeform (`----`)
/// atom. Setting an empty string removes the whole annotation.
#[proc_macro]
pub fn freeform_string_value_accessor(input: TokenStream) -> TokenStream {
    let Input { ident, name, headline, atom_ident, atom_ident_string } = parse_input(input);

    format!(
        "
/// ### {headline}
impl Tag {{
    /// Returns the {name} (`----:com.apple.iTunes:{atom_ident_string}`).
    pub fn {ident}(&self) -> Option<&str> {{
        self.strings_of(&{atom_ident}).next()
    }}

    /// Sets the {name} (`----:com.apple.iTunes:{atom_ident_string}`). An empty value removes
    /// the atom.
    pub fn set_{ident}(&mut self, {ident}: impl Into<String>) {{
        let value = {ident}.into();
        if value.is_empty() {{
            self.remove_data(&{atom_ident});
        }} else {{
            self.set_data(&{atom_ident}, crate::Data::Utf8(value));
        }}
    }}

    /// Removes the {name} (`----:com.apple.iTunes:{atom_ident_string}`).
    pub fn remove_{ident}(&mut self) {{
        self.remove_data(&{atom_ident});
    }}
}}
    "
    )
    .parse()
    .unwrap()
}
