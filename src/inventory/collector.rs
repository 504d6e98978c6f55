//! Inventory collector
//!
//! One engine for every array model. The model only decides which resource
//! types are collected and in which order; each step streams records from the
//! paged iterator straight into the sink.

use crate::error::Result;
use crate::report::RecordSink;
use crate::resource::{into_record, paged_resources, ArraySession, ResourceType};
use std::fmt;

/// Hardware generation of an array, as encoded in its SID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// VMAX (first generation) and older Symmetrix models
    Vmax2,
    /// VMAX3, VMAX All Flash and later
    Vmax3,
}

const VMAX2_STEPS: &[ResourceType] = &[
    ResourceType::Volume,
    ResourceType::Initiator,
    ResourceType::MaskingView,
    ResourceType::InitiatorGroup,
    ResourceType::CascadedInitiatorGroup,
    ResourceType::PortGroup,
    ResourceType::StorageGroup,
];

// Storage pools are listed before anything else on these models.
const VMAX3_STEPS: &[ResourceType] = &[
    ResourceType::StoragePool,
    ResourceType::Volume,
    ResourceType::Initiator,
    ResourceType::MaskingView,
    ResourceType::InitiatorGroup,
    ResourceType::CascadedInitiatorGroup,
    ResourceType::PortGroup,
    ResourceType::StorageGroup,
];

impl Generation {
    /// Ordered collection steps for this generation
    pub fn steps(self) -> &'static [ResourceType] {
        match self {
            Generation::Vmax2 => VMAX2_STEPS,
            Generation::Vmax3 => VMAX3_STEPS,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Vmax2 => f.write_str("VMAX-2"),
            Generation::Vmax3 => f.write_str("VMAX-3"),
        }
    }
}

/// Records written by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub resource: ResourceType,
    pub records: usize,
}

/// Runs the collection steps of one generation against one array
#[derive(Debug, Clone)]
pub struct Collector {
    generation: Generation,
    array_details: bool,
}

impl Collector {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            array_details: false,
        }
    }

    /// Also write the array's own details after the regular steps
    pub fn with_array_details(mut self, enabled: bool) -> Self {
        self.array_details = enabled;
        self
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Resource types in the order they will be collected
    pub fn steps(&self) -> Vec<ResourceType> {
        let mut steps = self.generation.steps().to_vec();
        if self.array_details {
            steps.push(ResourceType::Array);
        }
        steps
    }

    /// Collect everything into `sink`, then close it.
    ///
    /// The sink is closed even when a step fails, so the sheets written so far
    /// are flushed; the step's error is returned.
    pub fn collect<K, S>(&self, mut sink: K, session: &S) -> Result<Vec<StepOutcome>>
    where
        K: RecordSink,
        S: ArraySession + ?Sized,
    {
        tracing::info!(
            "Beginning of data extraction (Vmax SID:{}, {})",
            session.sid(),
            self.generation
        );

        let mut outcomes = Vec::new();
        let result = self.run_steps(&mut sink, session, &mut outcomes);

        match result {
            Ok(()) => {
                sink.close()?;
                tracing::info!("End of data extraction (Vmax SID:{})", session.sid());
                Ok(outcomes)
            }
            Err(err) => {
                tracing::error!("Data extraction aborted (Vmax SID:{}): {}", session.sid(), err);
                if let Err(close_err) = sink.close() {
                    tracing::warn!("Could not flush the partial report: {}", close_err);
                }
                Err(err)
            }
        }
    }

    fn run_steps<K, S>(
        &self,
        sink: &mut K,
        session: &S,
        outcomes: &mut Vec<StepOutcome>,
    ) -> Result<()>
    where
        K: RecordSink,
        S: ArraySession + ?Sized,
    {
        for resource in self.steps() {
            let records = match resource {
                ResourceType::Array => collect_array_details(sink, session)?,
                _ => collect_step(resource, sink, session)?,
            };
            outcomes.push(StepOutcome { resource, records });
        }
        Ok(())
    }
}

fn collect_step<K, S>(resource: ResourceType, sink: &mut K, session: &S) -> Result<usize>
where
    K: RecordSink,
    S: ArraySession + ?Sized,
{
    tracing::info!("- Extraction of {}", resource);

    let sheet = resource.def().sheet;
    let mut count = 0;
    for record in paged_resources(session, resource)? {
        sink.add_record(sheet, &record?)?;
        count += 1;
    }

    tracing::debug!("{} {} written", count, resource);
    Ok(count)
}

/// The array itself is a single object, described by its own SID
fn collect_array_details<K, S>(sink: &mut K, session: &S) -> Result<usize>
where
    K: RecordSink,
    S: ArraySession + ?Sized,
{
    tracing::info!("- Extraction of {}", ResourceType::Array);

    let response = session.describe(ResourceType::Array, session.sid())?;
    let record = into_record(ResourceType::Array, session.sid(), response)?;
    sink.add_record(ResourceType::Array.def().sheet, &record)?;
    Ok(1)
}
