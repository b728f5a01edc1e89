// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The OCR scanner (spec §4.4): emits the PDF version plus a coarse
//! "handwriting confidence" score, behind a pluggable, bounded registry of
//! named providers — the nearest teacher analogue is an adapter-by-name
//! lookup, reimplemented here as a small in-process registry since this
//! crate does not depend on any adapter machinery.

use std::path::Path;

use serde::Serialize;

use crate::error::{ScanError, ScanResult};
use crate::tokenscan::{count_tokens, read_pdf_version};

pub const MAX_PROVIDERS: usize = 16;
const MAX_CONFIDENCE: u32 = 100;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OcrReport {
    pub pdf_version: String,
    pub provider: String,
    pub handwriting_confidence: u8,
}

impl OcrReport {
    /// Flat JSON object, per spec §4.4.
    pub fn to_json(&self) -> ScanResult<String> {
        serde_json::to_string(self).map_err(|e| ScanError::InvalidArgument(e.to_string()))
    }
}

/// A named OCR provider. The built-in provider is a coarse heuristic; other
/// providers could wrap a real OCR engine behind the same interface.
pub trait OcrProvider: Send + Sync {
    fn name(&self) -> &str;
    fn scan(&self, path: &Path) -> ScanResult<OcrReport>;
}

/// Token weights for the built-in provider's handwriting heuristic (spec
/// §4.4: "counting weighted token hits").
const WEIGHTED_TOKENS: &[(&[u8], u32)] = &[
    (b"/Subtype/Ink", 3),
    (b"InkList", 2),
    (b"/Sig", 1),
    (b"Signature", 1),
];

/// The default, always-available provider: counts weighted ink/signature
/// token hits and caps the resulting score at 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl OcrProvider for BuiltinProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    fn scan(&self, path: &Path) -> ScanResult<OcrReport> {
        let pdf_version = read_pdf_version(path)?;
        let tokens: Vec<&[u8]> = WEIGHTED_TOKENS.iter().map(|(t, _)| *t).collect();
        let counts = count_tokens(path, &tokens)?;

        let score: u32 = counts
            .iter()
            .zip(WEIGHTED_TOKENS.iter())
            .map(|(&count, (_, weight))| count as u32 * weight)
            .sum();

        Ok(OcrReport {
            pdf_version,
            provider: self.name().to_string(),
            handwriting_confidence: score.min(MAX_CONFIDENCE) as u8,
        })
    }
}

/// A bounded (≤16) registry of named OCR providers. The first provider
/// registered is the default (spec §4.4: "default-first-registered").
pub struct ProviderRegistry {
    providers: Vec<Box<dyn OcrProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self { providers: Vec::new() }
    }

    /// Registers `provider`. Errs with `invalid_argument` if the registry is
    /// already at its bound of 16 entries.
    pub fn register(&mut self, provider: Box<dyn OcrProvider>) -> ScanResult<()> {
        if self.providers.len() >= MAX_PROVIDERS {
            return Err(ScanError::InvalidArgument(format!(
                "OCR provider registry is full (max {MAX_PROVIDERS})"
            )));
        }
        self.providers.push(provider);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn OcrProvider> {
        self.providers.iter().find(|p| p.name() == name).map(|p| p.as_ref())
    }

    /// The first-registered provider, used when the caller does not name one.
    pub fn default_provider(&self) -> Option<&dyn OcrProvider> {
        self.providers.first().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        // Unwrap is safe: registering into a freshly created, empty registry
        // can only fail once MAX_PROVIDERS entries already exist.
        #[allow(clippy::unwrap_used)]
        registry.register(Box::new(BuiltinProvider)).unwrap();
        registry
    }
}

/// Runs `name` (or the default provider if `name` is `None`) against `path`.
pub fn scan_ocr(registry: &ProviderRegistry, name: Option<&str>, path: &Path) -> ScanResult<OcrReport> {
    let provider = match name {
        Some(n) => registry
            .get(n)
            .ok_or_else(|| ScanError::UnknownProvider(n.to_string()))?,
        None => registry
            .default_provider()
            .ok_or_else(|| ScanError::InvalidArgument("OCR provider registry is empty".into()))?,
    };
    provider.scan(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write(body: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, body).unwrap();
        f
    }

    #[test]
    fn builtin_provider_is_registered_by_default() {
        let registry = ProviderRegistry::default();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("builtin").is_some());
        assert_eq!(registry.default_provider().unwrap().name(), "builtin");
    }

    #[test]
    fn scores_weighted_tokens_and_caps_at_100() {
        let mut body = b"%PDF-1.5\n".to_vec();
        for _ in 0..40 {
            body.extend_from_slice(b"/Subtype/Ink ");
        }
        let f = write(&body);
        let registry = ProviderRegistry::default();
        let report = scan_ocr(&registry, None, f.path()).unwrap();
        assert_eq!(report.handwriting_confidence, 100);
    }

    #[test]
    fn low_signal_document_scores_low() {
        let f = write(b"%PDF-1.5\nno markers of interest here");
        let registry = ProviderRegistry::default();
        let report = scan_ocr(&registry, None, f.path()).unwrap();
        assert_eq!(report.handwriting_confidence, 0);
    }

    #[test]
    fn unknown_provider_name_errors() {
        let registry = ProviderRegistry::default();
        let f = write(b"%PDF-1.5\nx");
        assert!(matches!(
            scan_ocr(&registry, Some("nope"), f.path()),
            Err(ScanError::UnknownProvider(_))
        ));
    }

    #[test]
    fn registry_rejects_past_bound() {
        #[derive(Default)]
        struct Named(String);
        impl OcrProvider for Named {
            fn name(&self) -> &str {
                &self.0
            }
            fn scan(&self, path: &Path) -> ScanResult<OcrReport> {
                BuiltinProvider.scan(path)
            }
        }

        let mut registry = ProviderRegistry::new();
        for i in 0..MAX_PROVIDERS {
            registry.register(Box::new(Named(format!("p{i}")))).unwrap();
        }
        assert!(registry.register(Box::new(Named("overflow".into()))).is_err());
    }
}
