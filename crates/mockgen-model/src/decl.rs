//! Declaration types
//!
//! Resolved trait declarations as handed over by the resolution phase.
//! Types are kept as source text; this crate never parses them beyond
//! recognising stream-returning methods.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Method receiver kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// `&self`
    #[default]
    Ref,
    /// `&mut self`
    Mut,
    /// `self`
    Owned,
}

impl Receiver {
    /// Receiver as written in a signature
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ref => "&self",
            Self::Mut => "&mut self",
            Self::Owned => "self",
        }
    }
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,
    /// Parameter type as source text
    pub ty: String,
}

impl ParamDecl {
    /// Create new parameter
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Owned type for storing the argument in a history buffer
    ///
    /// References are stored as the type `ToOwned` yields for them
    /// (`&str` → `String`, `&[T]` → `Vec<T>`, `&Path` → `PathBuf`, `&T` → `T`).
    /// Returns `None` for trait-object and `impl` references, which have
    /// no owned form.
    #[must_use]
    pub fn owned_ty(&self) -> Option<String> {
        let ty = self.ty.trim();
        let Some(rest) = ty.strip_prefix('&') else {
            return Some(ty.to_string());
        };
        let rest = rest.trim_start();
        let rest = rest.strip_prefix("mut ").unwrap_or(rest).trim_start();
        if rest.starts_with("dyn ") || rest.starts_with("impl ") {
            return None;
        }
        if let Some(inner) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            return Some(format!("Vec<{}>", inner.trim()));
        }

        let owned = match rest {
            "str" => "String",
            "Path" | "std::path::Path" => "PathBuf",
            "OsStr" | "std::ffi::OsStr" => "OsString",
            "CStr" | "std::ffi::CStr" => "CString",
            other => other,
        };
        Some(owned.to_string())
    }
}

/// Method declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Method name
    pub name: String,
    /// Receiver kind
    #[serde(default)]
    pub receiver: Receiver,
    /// Parameters (excluding receiver)
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Return type as source text; `None` for `()`
    #[serde(default)]
    pub return_type: Option<String>,
    /// Declared `async fn`
    #[serde(default)]
    pub is_async: bool,
}

impl MethodDecl {
    /// Create `&self` method without parameters returning `()`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: Receiver::Ref,
            params: Vec::new(),
            return_type: None,
            is_async: false,
        }
    }

    /// With receiver
    #[inline]
    #[must_use]
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    /// With additional parameter
    #[inline]
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(ParamDecl::new(name, ty));
        self
    }

    /// With return type
    #[inline]
    #[must_use]
    pub fn returning(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// As `async fn`
    #[inline]
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Item type of a stream-returning method
    ///
    /// Recognises `BoxStream<'_, T>`, `BoxStream<T>` and
    /// `impl Stream<Item = T>`, the return types a boxed broadcast stream
    /// can stand in for.
    #[must_use]
    pub fn stream_item(&self) -> Option<String> {
        let ty = self.return_type.as_deref()?.trim();

        if let Some(rest) = ty.strip_prefix("impl Stream<") {
            let inner = rest.strip_suffix('>')?;
            let item = inner.trim().strip_prefix("Item")?.trim_start().strip_prefix('=')?;
            return Some(item.trim().to_string());
        }

        let inner = ty.strip_prefix("BoxStream<")?.strip_suffix('>')?;

        // Skip a leading lifetime argument
        let item = match inner.split_once(',') {
            Some((first, rest)) if first.trim_start().starts_with('\'') => rest,
            _ => inner,
        };
        Some(item.trim().to_string())
    }
}

/// Resolved trait declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitDecl {
    /// Trait name
    pub name: String,
    /// Position of the declaration in its source
    pub offset: i64,
    /// Declared methods, in source order
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TraitDecl {
    /// Create trait declaration without methods
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, offset: i64) -> Self {
        Self {
            name: name.into(),
            offset,
            methods: Vec::new(),
        }
    }

    /// With additional method
    #[inline]
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Check if the declaration has no members to mock
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Validate names are present and methods are unique
    ///
    /// # Errors
    /// - `DeclError::MissingName` for a blank trait or method name
    /// - `DeclError::DuplicateMethod` when two methods share a name
    pub fn validate(&self) -> Result<(), DeclError> {
        if self.name.trim().is_empty() {
            return Err(DeclError::MissingName);
        }

        let mut seen = HashSet::new();
        for method in &self.methods {
            if method.name.trim().is_empty() {
                return Err(DeclError::MissingName);
            }
            if !seen.insert(method.name.as_str()) {
                return Err(DeclError::DuplicateMethod {
                    trait_name: self.name.clone(),
                    method: method.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Declaration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclError {
    /// Trait or method without a name
    #[error("declaration is missing a name")]
    MissingName,

    /// Method declared twice
    #[error("duplicate method '{method}' in trait '{trait_name}'")]
    DuplicateMethod {
        /// Owning trait
        trait_name: String,
        /// Repeated method name
        method: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_ty_strips_references() {
        assert_eq!(ParamDecl::new("s", "&str").owned_ty().as_deref(), Some("String"));
        assert_eq!(ParamDecl::new("b", "&[u8]").owned_ty().as_deref(), Some("Vec<u8>"));
        assert_eq!(ParamDecl::new("c", "&Config").owned_ty().as_deref(), Some("Config"));
        assert_eq!(ParamDecl::new("n", "u64").owned_ty().as_deref(), Some("u64"));
    }

    #[test]
    fn owned_ty_maps_unsized_std_types() {
        assert_eq!(ParamDecl::new("p", "&mut Path").owned_ty().as_deref(), Some("PathBuf"));
        assert_eq!(ParamDecl::new("p", "&std::path::Path").owned_ty().as_deref(), Some("PathBuf"));
        assert_eq!(ParamDecl::new("o", "&OsStr").owned_ty().as_deref(), Some("OsString"));
        assert_eq!(ParamDecl::new("c", "&CStr").owned_ty().as_deref(), Some("CString"));
    }

    #[test]
    fn owned_ty_rejects_trait_objects() {
        assert_eq!(ParamDecl::new("w", "&dyn Write").owned_ty(), None);
        assert_eq!(ParamDecl::new("w", "&mut dyn Write").owned_ty(), None);
        assert_eq!(ParamDecl::new("r", "&impl Read").owned_ty(), None);
    }

    #[test]
    fn stream_item_detection() {
        let boxed = MethodDecl::new("events").returning("BoxStream<'static, Event>");
        assert_eq!(boxed.stream_item().as_deref(), Some("Event"));

        let observable = MethodDecl::new("ticks").returning("Observable<u64>");
        assert_eq!(observable.stream_item(), None);

        let impl_stream = MethodDecl::new("lines").returning("impl Stream<Item = String>");
        assert_eq!(impl_stream.stream_item().as_deref(), Some("String"));

        let plain = MethodDecl::new("len").returning("usize");
        assert_eq!(plain.stream_item(), None);
        assert_eq!(MethodDecl::new("reset").stream_item(), None);
    }

    #[test]
    fn stream_item_keeps_generic_args() {
        let method = MethodDecl::new("pairs").returning("BoxStream<(String, Vec<u8>)>");
        assert_eq!(method.stream_item().as_deref(), Some("(String, Vec<u8>)"));
    }

    #[test]
    fn trait_decl_validate() {
        let decl = TraitDecl::new("Clock", 0)
            .with_method(MethodDecl::new("now").returning("u64"))
            .with_method(MethodDecl::new("sleep").with_param("ms", "u64"));
        assert!(decl.validate().is_ok());
        assert!(!decl.is_empty());
    }

    #[test]
    fn trait_decl_rejects_duplicates() {
        let decl = TraitDecl::new("Clock", 0)
            .with_method(MethodDecl::new("now"))
            .with_method(MethodDecl::new("now"));
        assert!(matches!(
            decl.validate(),
            Err(DeclError::DuplicateMethod { .. })
        ));
    }

    #[test]
    fn trait_decl_rejects_blank_name() {
        assert_eq!(TraitDecl::new(" ", 0).validate(), Err(DeclError::MissingName));
    }
}
