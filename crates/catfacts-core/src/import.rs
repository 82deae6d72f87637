//! The ingestion run: pull candidates from a provider into a store until a
//! target number of new facts is reached or the attempt budget runs out.

use serde::Serialize;

use crate::{
  Error, Result,
  provider::{FactProvider, RetryPolicy},
  store::FactStore,
};

/// Parameters of one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
  /// Number of newly accepted facts wanted.
  pub target: u32,
  /// Retry policy applied to every provider call.
  pub retry:  RetryPolicy,
}

impl ImportSettings {
  /// Hard ceiling on provider calls for the whole run.
  pub fn max_attempts(&self) -> u32 { self.target.saturating_mul(2) }
}

impl Default for ImportSettings {
  fn default() -> Self { Self { target: 5, retry: RetryPolicy::default() } }
}

/// Counters describing a finished ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub target:     u32,
  /// Candidates that were validated and newly stored.
  pub accepted:   u32,
  /// Provider calls made, whatever their outcome.
  pub attempts:   u32,
  pub duplicates: u32,
  /// Candidates rejected for their length.
  pub invalid:    u32,
  /// Provider calls that yielded nothing after exhausting retries.
  pub misses:     u32,
}

impl ImportReport {
  pub fn is_complete(&self) -> bool { self.accepted >= self.target }
}

/// Drives a [`FactProvider`] against a [`FactStore`].
pub struct ImportController<'a, S, P> {
  store:    &'a S,
  provider: &'a P,
  settings: ImportSettings,
}

impl<'a, S, P> ImportController<'a, S, P>
where
  S: FactStore,
  P: FactProvider,
{
  pub fn new(store: &'a S, provider: &'a P, settings: ImportSettings) -> Self {
    Self { store, provider, settings }
  }

  /// Run the ingestion loop to completion.
  ///
  /// Terminates after at most `2 * target` provider calls. Misses, invalid
  /// candidates and duplicates are counted and skipped; a partial result is
  /// still `Ok`. Any other store failure aborts the run.
  pub async fn run(&self) -> Result<ImportReport> {
    let target = self.settings.target;
    let max_attempts = self.settings.max_attempts();
    let mut report = ImportReport { target, ..ImportReport::default() };

    while report.accepted < target && report.attempts < max_attempts {
      let candidate = self.provider.fetch(self.settings.retry).await;
      report.attempts += 1;

      let Some(candidate) = candidate else {
        report.misses += 1;
        continue;
      };
      let candidate = candidate.trim();

      match self.store.insert(candidate).await {
        Ok(id) => {
          report.accepted += 1;
          tracing::info!(%id, fact = candidate, "inserted fact");
        }
        Err(Error::Validation(e)) => {
          report.invalid += 1;
          tracing::warn!(error = %e, fact = candidate, "invalid fact skipped");
        }
        Err(Error::Duplicate(_)) => {
          report.duplicates += 1;
          tracing::info!(fact = candidate, "skipped duplicate");
        }
        Err(e) => {
          tracing::error!(error = %e, attempts = report.attempts, "import aborted");
          return Err(e);
        }
      }
    }

    if report.is_complete() {
      tracing::info!(accepted = report.accepted, "successfully fetched {target} unique facts");
    } else {
      tracing::warn!(
        accepted = report.accepted,
        attempts = report.attempts,
        duplicates = report.duplicates,
        invalid = report.invalid,
        misses = report.misses,
        "fetched only {} unique facts out of requested {target}",
        report.accepted
      );
    }

    Ok(report)
  }
}
