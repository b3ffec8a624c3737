//! Testing utilities for mockgen workspace
//!
//! Shared fixtures, scripted entities and delivery probes.

#![allow(missing_docs)]

use mockgen_model::{EntityKey, MethodDecl, MockModel, Receiver, RenderOptions, ResolvedEntity, TraitDecl};
use mockgen_template::TraitEntity;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Entity whose render result is fixed up front
#[derive(Debug, Clone)]
pub struct ScriptedEntity {
    pub key: EntityKey,
    pub text: Option<String>,
    pub offset: i64,
    pub panics: bool,
}

#[derive(Debug, Clone)]
pub struct ScriptedModel {
    text: Option<String>,
    offset: i64,
    panics: bool,
}

impl MockModel for ScriptedModel {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn offset(&self) -> i64 {
        self.offset
    }

    fn render(&self, _key: &EntityKey, _encloser: &str, _options: &RenderOptions) -> Option<String> {
        if self.panics {
            panic!("scripted render failure");
        }
        self.text.clone()
    }
}

impl ResolvedEntity for ScriptedEntity {
    type Model = ScriptedModel;

    fn key(&self) -> &EntityKey {
        &self.key
    }

    fn model(&self) -> Self::Model {
        ScriptedModel {
            text: self.text.clone(),
            offset: self.offset,
            panics: self.panics,
        }
    }
}

pub fn scripted(key: &str, text: &str, offset: i64) -> ScriptedEntity {
    ScriptedEntity {
        key: EntityKey::new(key),
        text: Some(text.to_string()),
        offset,
        panics: false,
    }
}

pub fn scripted_absent(key: &str, offset: i64) -> ScriptedEntity {
    ScriptedEntity {
        key: EntityKey::new(key),
        text: None,
        offset,
        panics: false,
    }
}

pub fn scripted_panicking(key: &str, offset: i64) -> ScriptedEntity {
    ScriptedEntity {
        key: EntityKey::new(key),
        text: Some("unreachable".to_string()),
        offset,
        panics: true,
    }
}

/// `count` entities with distinct text `mock{i}` at offset `i`
pub fn numbered_entities(count: usize) -> Vec<ScriptedEntity> {
    (0..count)
        .map(|i| {
            let offset = i64::try_from(i).unwrap_or(i64::MAX);
            scripted(&format!("gen.Entity{i}"), &format!("mock{i}"), offset)
        })
        .collect()
}

pub fn clock_decl(offset: i64) -> TraitDecl {
    TraitDecl::new("Clock", offset)
        .with_method(MethodDecl::new("now").returning("u64"))
        .with_method(
            MethodDecl::new("sleep")
                .with_receiver(Receiver::Mut)
                .with_param("ms", "u64"),
        )
}

pub fn store_decl(offset: i64) -> TraitDecl {
    TraitDecl::new("Store", offset)
        .with_method(
            MethodDecl::new("get")
                .with_param("key", "&str")
                .returning("Option<Vec<u8>>"),
        )
        .with_method(
            MethodDecl::new("put")
                .with_param("key", "&str")
                .with_param("value", "Vec<u8>"),
        )
        .with_method(MethodDecl::new("changes").returning("BoxStream<'static, String>"))
}

pub fn trait_entity(key: &str, decl: TraitDecl) -> TraitEntity {
    TraitEntity::new(key, decl).unwrap()
}

/// Callback target that detects overlapping deliveries
///
/// Each delivery holds the probe for `hold` so that concurrent deliveries
/// would be observed as overlaps.
#[derive(Debug, Default)]
pub struct DeliveryProbe {
    in_flight: AtomicUsize,
    overlaps: AtomicUsize,
    hold: Duration,
    delivered: Mutex<Vec<(String, i64)>>,
}

impl DeliveryProbe {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            ..Self::default()
        }
    }

    pub fn record(&self, text: String, offset: i64) {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) != 0 {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        if !self.hold.is_zero() {
            thread::sleep(self.hold);
        }
        self.delivered.lock().push((text, offset));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    /// Delivered pairs sorted by offset, then text
    pub fn delivered_sorted(&self) -> Vec<(String, i64)> {
        let mut delivered = self.delivered.lock().clone();
        delivered.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        delivered
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().len()
    }
}
