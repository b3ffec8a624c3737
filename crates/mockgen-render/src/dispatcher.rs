//! Render dispatcher
//!
//! Rendering an entity is pure and independent of every other entity, so
//! it may run on any worker. Delivery is the one shared concern: the
//! completion callback is invoked by at most one thread at a time, either
//! under a mutex ([`DeliveryStrategy::Locked`]) or from the single thread
//! draining a channel ([`DeliveryStrategy::Channel`]).
//!
//! No ordering is guaranteed between entities. Consumers needing source
//! order sort by offset after collection.

use crate::config::{DeliveryStrategy, DispatchConfig, DispatchMode};
use crate::error::{DispatchError, RenderFailure};
use crate::report::{RenderReport, Tally};
use crossbeam::channel;
use mockgen_model::{MockModel, RenderOptions, RenderOutcome, RenderedMock, ResolvedEntity};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Render every entity with `options`, delivering non-empty text to `completion`
///
/// Uses the default dispatcher: parallel on the global rayon pool with
/// lock-guarded delivery. `completion` receives `(text, offset)` once per
/// rendered entity and never runs concurrently with itself.
pub fn render_templates<E, F>(entities: &[E], options: &RenderOptions, completion: F) -> RenderReport
where
    E: ResolvedEntity,
    F: FnMut(String, i64) + Send,
{
    RenderDispatcher::with_options(*options).dispatch(entities, completion)
}

/// Render a single entity
///
/// Builds the model and renders it with the model's name as encloser.
///
/// # Errors
/// - `RenderFailure` if building or rendering the model panics
pub fn render_entity<E: ResolvedEntity>(
    entity: &E,
    options: &RenderOptions,
) -> Result<RenderOutcome, RenderFailure> {
    let key = entity.key();
    panic::catch_unwind(AssertUnwindSafe(|| {
        let model = entity.model();
        let text = model.render(key, model.name(), options);
        RenderOutcome::from_render(key, text, model.offset())
    }))
    .map_err(|payload| RenderFailure::new(key.clone(), panic_message(&*payload)))
}

/// Dispatcher rendering batches of entities
///
/// # Example
///
/// ```rust
/// use mockgen_model::{MethodDecl, TraitDecl};
/// use mockgen_render::{DeliveryStrategy, DispatchConfig, RenderDispatcher};
/// use mockgen_template::TraitEntity;
///
/// let config = DispatchConfig::new()
///     .with_delivery(DeliveryStrategy::Channel)
///     .with_threads(2);
/// let dispatcher = RenderDispatcher::new(config).unwrap();
///
/// let entities: Vec<TraitEntity> = (0..8)
///     .map(|i| {
///         let decl = TraitDecl::new(format!("Service{i}"), i).with_method(MethodDecl::new("call"));
///         TraitEntity::new(&format!("svc.Service{i}"), decl).unwrap()
///     })
///     .collect();
///
/// let mut delivered = 0;
/// let report = dispatcher.dispatch(&entities, |_text, _offset| delivered += 1);
/// assert_eq!(delivered, 8);
/// assert_eq!(report.rendered, 8);
/// ```
#[derive(Debug)]
pub struct RenderDispatcher {
    config: DispatchConfig,
    pool: Option<rayon::ThreadPool>,
}

impl RenderDispatcher {
    /// Create dispatcher
    ///
    /// A dedicated pool is built when `threads` is set for parallel mode.
    ///
    /// # Errors
    /// - `DispatchError::InvalidConfig` if the configuration fails validation
    /// - `DispatchError::ThreadPool` if the dedicated pool cannot be built
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        config.validate()?;

        let pool = match (config.mode, config.threads) {
            (DispatchMode::Parallel, Some(threads)) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("mockgen-render-{i}"))
                    .build()?,
            ),
            _ => None,
        };

        Ok(Self { config, pool })
    }

    /// Default dispatcher with the given options
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            config: DispatchConfig::new().with_options(options),
            pool: None,
        }
    }

    /// Sequential dispatcher with the given options
    #[must_use]
    pub fn sequential(options: RenderOptions) -> Self {
        Self {
            config: DispatchConfig::sequential(options),
            pool: None,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Render all entities and deliver non-empty results
    ///
    /// `completion` is called exactly once per entity with non-empty text,
    /// with `(text, offset)`, and never concurrently. Empty renders are
    /// skipped; panicking entities are reported as failures without
    /// affecting the rest of the batch. Returns after every entity has been
    /// attempted.
    pub fn dispatch<E, F>(&self, entities: &[E], completion: F) -> RenderReport
    where
        E: ResolvedEntity,
        F: FnMut(String, i64) + Send,
    {
        tracing::debug!(
            "Dispatching {} entities ({:?}, {:?})",
            entities.len(),
            self.config.mode,
            self.config.delivery
        );

        let report = match self.config.delivery {
            DeliveryStrategy::Locked => self.dispatch_locked(entities, completion),
            DeliveryStrategy::Channel => self.dispatch_channel(entities, completion),
        };

        if report.is_clean() {
            tracing::info!(
                "Rendered {} mocks, skipped {} empty entities",
                report.rendered,
                report.skipped.len()
            );
        } else {
            tracing::warn!(
                "Rendered {} mocks, skipped {}, failed {}",
                report.rendered,
                report.skipped.len(),
                report.failed.len()
            );
        }

        report
    }

    /// Workers deliver directly while holding the sink lock
    fn dispatch_locked<E, F>(&self, entities: &[E], completion: F) -> RenderReport
    where
        E: ResolvedEntity,
        F: FnMut(String, i64) + Send,
    {
        let sink = Mutex::new(completion);
        let deliver = |mock: RenderedMock| {
            let mut completion = sink.lock();
            (*completion)(mock.text, mock.offset);
        };

        RenderReport::from_tallies(self.render_all(entities, &deliver))
    }

    /// Workers send results; the calling thread is the only consumer
    fn dispatch_channel<E, F>(&self, entities: &[E], mut completion: F) -> RenderReport
    where
        E: ResolvedEntity,
        F: FnMut(String, i64) + Send,
    {
        let (tx, rx) = channel::unbounded::<RenderedMock>();

        thread::scope(|scope| {
            let producer = scope.spawn(move || {
                let deliver = |mock: RenderedMock| {
                    if tx.send(mock).is_err() {
                        tracing::error!("Render channel closed before delivery");
                    }
                };
                self.render_all(entities, &deliver)
            });

            // Ends once the producer drops its sender
            for mock in rx.iter() {
                completion(mock.text, mock.offset);
            }

            match producer.join() {
                Ok(tallies) => RenderReport::from_tallies(tallies),
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    }

    /// Render every entity according to the dispatch mode
    fn render_all<E, D>(&self, entities: &[E], deliver: &D) -> Vec<Tally>
    where
        E: ResolvedEntity,
        D: Fn(RenderedMock) + Sync,
    {
        let options = &self.config.options;

        match self.config.mode {
            DispatchMode::Sequential => entities
                .iter()
                .map(|entity| render_and_deliver(entity, options, deliver))
                .collect(),
            DispatchMode::Parallel => {
                let run = || -> Vec<Tally> {
                    entities
                        .par_iter()
                        .map(|entity| render_and_deliver(entity, options, deliver))
                        .collect()
                };
                match &self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }
            }
        }
    }
}

fn render_and_deliver<E, D>(entity: &E, options: &RenderOptions, deliver: &D) -> Tally
where
    E: ResolvedEntity,
    D: Fn(RenderedMock),
{
    match render_entity(entity, options) {
        Ok(RenderOutcome::Rendered(mock)) => {
            deliver(mock);
            Tally::Delivered
        }
        Ok(RenderOutcome::Skipped) => {
            tracing::trace!("Skipping {}: nothing to render", entity.key());
            Tally::Skipped(entity.key().clone())
        }
        Err(failure) => {
            tracing::warn!("{}", failure);
            Tally::Failed(failure)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
