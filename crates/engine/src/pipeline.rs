//! Conversion pipeline
//!
//! Strictly sequential batch flow: locate and read all fragments, verify
//! counts, derive metadata, convert velocities, subsample, select columns,
//! then hand each active type's columns to the sink in ascending type index
//! order. The sink is invoked only after every upstream stage has succeeded,
//! so a failing run never leaves partial datasets behind.

use snapconv_core::{
    Column, ColumnData, ColumnPayload, DatasetSink, ParticleType, Result, Settings,
};
use snapconv_gadget::read_snapshot;
use tracing::{debug, info};

use crate::metadata::{active_types, normalize};
use crate::policy::select_columns;
use crate::subsample::decimate_columns;
use crate::velocity::to_peculiar;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSummary {
    /// Fragments read from the source snapshot
    pub fragments: usize,
    /// Dataset labels written, in write order
    pub datasets: Vec<String>,
    /// Column names written per dataset
    pub columns: Vec<&'static str>,
    /// Particles written across all datasets (post-subsampling)
    pub particles: u64,
}

/// Run the full conversion for one snapshot
pub fn convert(settings: &Settings, sink: &mut dyn DatasetSink) -> Result<ConvertSummary> {
    let snapshot = read_snapshot(&settings.source)?;
    let metadata = normalize(&snapshot.header, settings);

    let mut columns = snapshot.columns;
    to_peculiar(&mut columns, metadata.time);

    if let Some(stride) = settings.effective_stride() {
        debug!(stride, "subsampling particles");
        decimate_columns(&mut columns, stride);
    }

    let selected = select_columns(&metadata);
    let keep_mass = selected.contains(&Column::Mass);
    let active = active_types(&metadata);
    let column_names: Vec<&'static str> = selected.iter().map(|c| c.name()).collect();
    info!(
        columns = ?column_names,
        types = ?active.iter().map(|t| t.index()).collect::<Vec<_>>(),
        "selected output columns"
    );

    let mut datasets = Vec::with_capacity(active.len());
    let mut particles = 0u64;
    for &ptype in &active {
        let written = write_type(&columns, &metadata, ptype, keep_mass, sink)?;
        particles += written;
        datasets.push(ptype.label());
    }

    info!(datasets = datasets.len(), particles, "conversion complete");
    Ok(ConvertSummary {
        fragments: snapshot.fragments,
        datasets,
        columns: column_names,
        particles,
    })
}

fn write_type(
    columns: &snapconv_core::SnapshotColumns,
    metadata: &snapconv_core::SnapshotMetadata,
    ptype: ParticleType,
    keep_mass: bool,
    sink: &mut dyn DatasetSink,
) -> Result<u64> {
    let staged = columns.get(ptype);

    let mut out = vec![
        ColumnData {
            name: "Position",
            nmemb: 3,
            payload: ColumnPayload::F32(&staged.position),
        },
        ColumnData {
            name: "Velocity",
            nmemb: 3,
            payload: ColumnPayload::F32(&staged.velocity),
        },
        ColumnData {
            name: "ID",
            nmemb: 1,
            payload: ColumnPayload::U32(&staged.id),
        },
    ];

    // Table-mass types have no staged mass; when the policy forces the
    // column anyway, fill it from the table entry so every dataset carries
    // usable mass data.
    let synthesized: Option<Vec<f32>> = if keep_mass && staged.mass.is_empty() {
        Some(vec![
            metadata.mass_table[ptype.index()] as f32;
            staged.len()
        ])
    } else {
        None
    };
    if keep_mass {
        let mass: &[f32] = synthesized.as_deref().unwrap_or(&staged.mass);
        out.push(ColumnData {
            name: "Mass",
            nmemb: 1,
            payload: ColumnPayload::F32(mass),
        });
    }

    sink.write_dataset(&ptype.label(), &out, metadata)?;
    Ok(staged.len() as u64)
}
