//! Locator typename registry and alias store seam
//!
//! Literal locator text has the shape `typename:arg1,arg2,...` where
//! arguments may be double-quoted to carry commas, parentheses, and
//! whitespace verbatim. Text with no typename prefix defaults to an alias
//! lookup. The registry owns the typename→constructor map; alias
//! persistence stays behind the [`AliasStore`] trait.

use crate::errors::ExprError;
use crate::types::{ImageTemplate, Locator};
use spotter_core_types::{Point, Region};
use std::collections::HashMap;
use std::sync::Arc;

/// Alias lookup collaborator
///
/// The only required capability: resolve a name into the locator stored
/// under it. Misses fail with "unknown alias".
pub trait AliasStore: Send + Sync {
    fn lookup(&self, name: &str) -> Result<Locator, ExprError>;
}

/// HashMap-backed alias store used by tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct InMemoryAliasStore {
    aliases: HashMap<String, Locator>,
}

impl InMemoryAliasStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a locator under a name, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, locator: Locator) {
        self.aliases.insert(name.into(), locator);
    }
}

impl AliasStore for InMemoryAliasStore {
    fn lookup(&self, name: &str) -> Result<Locator, ExprError> {
        self.aliases
            .get(name)
            .cloned()
            .ok_or_else(|| ExprError::UnknownAlias(name.to_string()))
    }
}

/// Constructor turning comma-split literal arguments into a locator
pub type LocatorConstructor = fn(&[String]) -> Result<Locator, ExprError>;

/// Typename→constructor registry for locator literals
#[derive(Clone)]
pub struct LocatorRegistry {
    constructors: HashMap<String, LocatorConstructor>,
    aliases: Option<Arc<dyn AliasStore>>,
}

impl Default for LocatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorRegistry {
    /// Create a registry preloaded with the builtin typenames
    pub fn new() -> Self {
        let mut registry = Self {
            constructors: HashMap::new(),
            aliases: None,
        };
        registry.register("coordinates", build_coordinates);
        registry.register("offset", build_offset);
        registry.register("point", build_point);
        registry.register("region", build_region);
        registry.register("image", build_image);
        registry.register("ocr", build_ocr);
        registry.register("browser", build_browser);
        registry
    }

    /// Attach an alias store
    pub fn with_aliases(mut self, store: Arc<dyn AliasStore>) -> Self {
        self.aliases = Some(store);
        self
    }

    /// Register a constructor, replacing any previous one for the typename
    pub fn register(&mut self, type_name: impl Into<String>, constructor: LocatorConstructor) {
        self.constructors.insert(type_name.into(), constructor);
    }

    /// Parse a locator literal into a locator
    pub fn parse_literal(&self, text: &str) -> Result<Locator, ExprError> {
        let (type_name, value) = split_type(text);
        let args = split_args(value);

        if type_name == "alias" {
            let name = args.join(",");
            return match &self.aliases {
                Some(store) => store.lookup(&name),
                None => Err(ExprError::UnknownAlias(name)),
            };
        }

        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| ExprError::UnknownLocatorType(type_name.to_string()))?;
        constructor(&args)
    }
}

/// Split a literal on the first `:` occurring outside quotes
///
/// No such colon means the whole text is an alias value.
fn split_type(text: &str) -> (&str, &str) {
    for (index, ch) in text.char_indices() {
        match ch {
            '"' => break,
            ':' => return (&text[..index], &text[index + 1..]),
            _ => {}
        }
    }
    ("alias", text)
}

/// Comma-split a literal value, honoring double quotes
///
/// Quotes are stripped; their contents (including commas, parentheses, and
/// whitespace) pass through verbatim.
fn split_args(value: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in value.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => args.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    args.push(current);
    args
}

fn malformed(type_name: &str, reason: impl Into<String>) -> ExprError {
    ExprError::MalformedLocator {
        type_name: type_name.to_string(),
        reason: reason.into(),
    }
}

fn parse_int(type_name: &str, arg: &str) -> Result<i32, ExprError> {
    arg.trim()
        .parse()
        .map_err(|_| malformed(type_name, format!("'{}' is not an integer", arg)))
}

fn int_args<const N: usize>(type_name: &str, args: &[String]) -> Result<[i32; N], ExprError> {
    if args.len() != N {
        return Err(malformed(
            type_name,
            format!("expected {} integer arguments, got {}", N, args.len()),
        ));
    }
    let mut values = [0i32; N];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = parse_int(type_name, arg)?;
    }
    Ok(values)
}

fn build_coordinates(args: &[String]) -> Result<Locator, ExprError> {
    let [x, y] = int_args("coordinates", args)?;
    Ok(Locator::Coordinates { x, y })
}

fn build_offset(args: &[String]) -> Result<Locator, ExprError> {
    let [dx, dy] = int_args("offset", args)?;
    Ok(Locator::Offset { dx, dy })
}

fn build_point(args: &[String]) -> Result<Locator, ExprError> {
    let [x, y] = int_args("point", args)?;
    Ok(Locator::Point(Point::new(x, y)))
}

fn build_region(args: &[String]) -> Result<Locator, ExprError> {
    let [left, top, right, bottom] = int_args("region", args)?;
    Ok(Locator::Region(Region::new(left, top, right, bottom)?))
}

fn build_image(args: &[String]) -> Result<Locator, ExprError> {
    if args.is_empty() || args.len() > 3 || args[0].is_empty() {
        return Err(malformed(
            "image",
            "expected path with optional confidence and source arguments",
        ));
    }
    let confidence = match args.get(1) {
        Some(arg) => {
            let value: u8 = arg
                .trim()
                .parse()
                .ok()
                .filter(|v| (1..=100).contains(v))
                .ok_or_else(|| {
                    malformed("image", format!("confidence '{}' is not in 1-100", arg))
                })?;
            Some(value)
        }
        None => None,
    };
    Ok(Locator::Image(ImageTemplate {
        path: args[0].clone(),
        confidence,
        source: args.get(2).cloned(),
    }))
}

fn build_ocr(args: &[String]) -> Result<Locator, ExprError> {
    let text = args.join(",");
    if text.is_empty() {
        return Err(malformed("ocr", "expected text to recognize"));
    }
    Ok(Locator::Ocr { text })
}

fn build_browser(args: &[String]) -> Result<Locator, ExprError> {
    if args.is_empty() || args.iter().all(|arg| arg.is_empty()) {
        return Err(malformed("browser", "expected selector arguments"));
    }
    Ok(Locator::Browser {
        args: args.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_builtin_literals() {
        let registry = LocatorRegistry::new();
        assert_eq!(
            registry.parse_literal("coordinates:10,20").unwrap(),
            Locator::Coordinates { x: 10, y: 20 }
        );
        assert_eq!(
            registry.parse_literal("point:1,-2").unwrap(),
            Locator::Point(Point::new(1, -2))
        );
        assert_eq!(
            registry.parse_literal("region:0,0,10,10").unwrap(),
            Locator::Region(Region::new(0, 0, 10, 10).unwrap())
        );
        assert_eq!(
            registry.parse_literal("image:logo.png,90,screen.png").unwrap(),
            Locator::Image(ImageTemplate {
                path: "logo.png".to_string(),
                confidence: Some(90),
                source: Some("screen.png".to_string()),
            })
        );
    }

    #[test]
    fn quoted_arguments_keep_commas_and_whitespace() {
        let registry = LocatorRegistry::new();
        assert_eq!(
            registry.parse_literal("ocr:\"Save, please (now)\"").unwrap(),
            Locator::Ocr {
                text: "Save, please (now)".to_string()
            }
        );
        assert_eq!(
            registry.parse_literal("image:\"my logo.png\",80").unwrap(),
            Locator::Image(ImageTemplate {
                path: "my logo.png".to_string(),
                confidence: Some(80),
                source: None,
            })
        );
    }

    #[test]
    fn bare_text_defaults_to_alias() {
        let mut store = InMemoryAliasStore::new();
        store.insert("ok button", Locator::Coordinates { x: 5, y: 6 });
        let registry = LocatorRegistry::new().with_aliases(Arc::new(store));

        assert_eq!(
            registry.parse_literal("\"ok button\"").unwrap(),
            Locator::Coordinates { x: 5, y: 6 }
        );
        assert_eq!(
            registry.parse_literal("missing"),
            Err(ExprError::UnknownAlias("missing".to_string()))
        );
    }

    #[test]
    fn alias_without_store_fails() {
        let registry = LocatorRegistry::new();
        assert_eq!(
            registry.parse_literal("anything"),
            Err(ExprError::UnknownAlias("anything".to_string()))
        );
    }

    #[test]
    fn unknown_typename_fails() {
        let registry = LocatorRegistry::new();
        assert_eq!(
            registry.parse_literal("martian:1,2"),
            Err(ExprError::UnknownLocatorType("martian".to_string()))
        );
    }

    #[test]
    fn malformed_literals_fail() {
        let registry = LocatorRegistry::new();
        assert!(matches!(
            registry.parse_literal("point:1"),
            Err(ExprError::MalformedLocator { .. })
        ));
        assert!(matches!(
            registry.parse_literal("coordinates:a,b"),
            Err(ExprError::MalformedLocator { .. })
        ));
        assert!(matches!(
            registry.parse_literal("image:logo.png,0"),
            Err(ExprError::MalformedLocator { .. })
        ));
        // inverted region edges surface the geometry failure
        assert!(matches!(
            registry.parse_literal("region:10,10,5,20"),
            Err(ExprError::Geometry(_))
        ));
    }

    #[test]
    fn custom_typenames_can_be_registered() {
        fn build_origin(_args: &[String]) -> Result<Locator, ExprError> {
            Ok(Locator::Point(Point::new(0, 0)))
        }

        let mut registry = LocatorRegistry::new();
        registry.register("origin", build_origin);
        assert_eq!(
            registry.parse_literal("origin:").unwrap(),
            Locator::Point(Point::new(0, 0))
        );
    }
}
