//! Class paths: a package and a simple name, split out of the `/`-separated
//! internal form the class file stores.

use std::fmt::{Display, Formatter};

/// Identifies a class by its package segments and simple name.
///
/// `java/lang/Object` becomes `package = ["java", "lang"]`,
/// `name = "Object"`. No segment ever contains a `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassPath {
    pub package: Vec<String>,
    pub name: String,
}

impl ClassPath {
    pub fn new<S: Into<String>>(package: Vec<String>, name: S) -> Self {
        Self {
            package,
            name: name.into(),
        }
    }

    /// Splits an internal binary name like `java/util/Map` on `/`.
    pub fn from_internal_name(name: &str) -> Self {
        let mut segments: Vec<String> = name.split('/').map(|s| s.to_string()).collect();
        let simple = segments.pop().unwrap_or_default();
        Self {
            package: segments,
            name: simple,
        }
    }

    /// The implicit super class of every class without one.
    pub fn java_lang_object() -> Self {
        Self {
            package: vec!["java".to_string(), "lang".to_string()],
            name: "Object".to_string(),
        }
    }
}

impl Display for ClassPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for segment in &self.package {
            write!(f, "{}/", segment)?;
        }
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_slashes() {
        let path = ClassPath::from_internal_name("java/util/Map");
        assert_eq!(path.package, vec!["java", "util"]);
        assert_eq!(path.name, "Map");
        assert_eq!(path.to_string(), "java/util/Map");
    }

    #[test]
    fn default_package() {
        let path = ClassPath::from_internal_name("Standalone");
        assert!(path.package.is_empty());
        assert_eq!(path.name, "Standalone");
        assert_eq!(path.to_string(), "Standalone");
    }
}
