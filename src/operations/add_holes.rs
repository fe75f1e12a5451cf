use crate::config::HoleConfig;
use crate::error::{HoleError, PreconditionError, PreconditionFailures, Result};
use crate::host::{Host, ObstructionFilter, RayHit, TransactionGuard, UserNotifier};

use super::conduits::{CollectConduits, LinearConduit, SkippedConduit};
use super::obstruction::ObstructionCollector;
use super::placement::{Opening, OpeningTemplate, PlacementEngine};
use super::resolve::resolve_hits;

/// What a successful run produced.
#[derive(Debug, Default)]
pub struct PlacementReport {
    pub openings: Vec<Opening>,
    /// Straight conduits that were ray cast.
    pub conduits: usize,
    /// Source elements left out by the non-linear policy.
    pub skipped: Vec<SkippedConduit>,
    /// Raw hits returned by the ray caster, over all conduits.
    pub hits_cast: usize,
    /// Hits that survived range filtering and deduplication.
    pub hits_kept: usize,
}

/// Outcome of one command run.
#[derive(Debug)]
pub enum CommandResult {
    /// Every opening was created and committed.
    Succeeded(PlacementReport),
    /// A precondition failed; nothing was read or written.
    Cancelled(PreconditionFailures),
    /// Something failed after the preconditions held; nothing was committed.
    Failed(HoleError),
}

impl CommandResult {
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    #[must_use]
    pub fn report(&self) -> Option<&PlacementReport> {
        match self {
            Self::Succeeded(report) => Some(report),
            _ => None,
        }
    }
}

/// Places an opening wherever a linked duct or pipe crosses a wall of the
/// active document.
///
/// Preconditions → collect → resolve → place → commit. All preconditions
/// are checked before any conduit is read and reported together; all
/// placements share one transaction.
pub struct AddHoles {
    config: HoleConfig,
}

impl AddHoles {
    /// Creates a new `AddHoles` command.
    #[must_use]
    pub fn new(config: HoleConfig) -> Self {
        Self { config }
    }

    /// Runs the command and reports a cancellation or failure through
    /// `notifier`, one message per run.
    pub fn run<H: Host + ?Sized>(&self, host: &mut H, notifier: &dyn UserNotifier) -> CommandResult {
        let result = self.execute(host);
        match &result {
            CommandResult::Succeeded(_) => {}
            CommandResult::Cancelled(failures) => {
                notifier.report_error(&self.config.error_title, &failures.to_string());
            }
            CommandResult::Failed(err) => {
                notifier.report_error(&self.config.error_title, &err.to_string());
            }
        }
        result
    }

    /// Runs the command against `host`.
    pub fn execute<H: Host + ?Sized>(&self, host: &mut H) -> CommandResult {
        match self.try_execute(host) {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(%err, "hole placement failed");
                CommandResult::Failed(err)
            }
        }
    }

    fn try_execute<H: Host + ?Sized>(&self, host: &mut H) -> Result<CommandResult> {
        let doc = host.active_document();
        let mut failures = PreconditionFailures::default();

        let source = host.find_linked_document_by_title(&self.config.link_title_marker);
        if source.is_none() {
            failures.0.push(PreconditionError::MissingLinkedDocument {
                marker: self.config.link_title_marker.clone(),
            });
        }
        let template = OpeningTemplate::locate(&*host, doc, &self.config, &mut failures)?;
        let view = ObstructionCollector::find_view(&*host, doc)?;
        if view.is_none() {
            failures.0.push(PreconditionError::MissingViewContext);
        }

        let (Some(source), Some(template), Some(view)) = (source, template, view) else {
            for failure in failures.iter() {
                tracing::warn!(%failure, "precondition failed");
            }
            return Ok(CommandResult::Cancelled(failures));
        };

        let set = CollectConduits::new(self.config.non_linear).execute(&*host, source)?;

        let filter = ObstructionFilter {
            include_links: self.config.include_linked_walls,
        };
        let collector = ObstructionCollector::new(&*host, doc, view, filter);
        let mut hits_cast = 0;
        let mut plan: Vec<(&LinearConduit, Vec<RayHit>)> = Vec::with_capacity(set.conduits.len());
        for conduit in &set.conduits {
            let hits = collector.hits_along(conduit)?;
            hits_cast += hits.len();
            plan.push((conduit, resolve_hits(conduit, &hits)));
        }
        let hits_kept = plan.iter().map(|(_, hits)| hits.len()).sum();

        let engine = PlacementEngine::new(doc, template);
        let mut tx = TransactionGuard::begin(host, doc, &self.config.transaction_name)?;
        let mut openings = Vec::with_capacity(hits_kept);
        for (conduit, hits) in &plan {
            openings.extend(engine.place(tx.host(), conduit, hits)?);
        }
        tx.commit()?;

        tracing::info!(
            conduits = set.conduits.len(),
            openings = openings.len(),
            "placed openings"
        );
        Ok(CommandResult::Succeeded(PlacementReport {
            openings,
            conduits: set.conduits.len(),
            skipped: set.skipped,
            hits_cast,
            hits_kept,
        }))
    }
}
