use crate::dispatch::{DeliveryOutcome, DeliveryReport};
use crate::model::{ParticipantRecord, Registry};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Charge les participants ; CSV si l'extension est `.csv`, JSON sinon.
pub fn load_participants<P: AsRef<Path>>(path: P) -> anyhow::Result<Registry> {
    let path = path.as_ref();
    let records = if is_csv(path) {
        import_records_csv(path)?
    } else {
        import_records_json(path)?
    };
    Registry::from_records(records).with_context(|| format!("loading {}", path.display()))
}

/// Import JSON : tableau de `{"full_name": ..., "ph_number": ...}`
pub fn import_records_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ParticipantRecord>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<ParticipantRecord> =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

/// Import CSV : colonnes `full_name` et `ph_number` lues par nom d'en-tête (alias acceptés)
pub fn import_records_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ParticipantRecord>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.deserialize::<ParticipantRecord>().enumerate() {
        let row = idx + 2;
        let rec = rec.with_context(|| format!("parsing {} (row {row})", path.display()))?;
        if rec.full_name.is_empty() || rec.ph_number.is_empty() {
            bail!("row {row}: invalid participant row (empty)");
        }
        out.push(rec);
    }
    Ok(out)
}

/// Écrit `bytes` de manière atomique (fichier temporaire + rename).
fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Export du rapport ; CSV si l'extension est `.csv`, JSON sinon.
pub fn export_report<P: AsRef<Path>>(path: P, report: &DeliveryReport) -> anyhow::Result<()> {
    let path = path.as_ref();
    if is_csv(path) {
        export_report_csv(path, report)
    } else {
        export_report_json(path, report)
    }
}

/// Export JSON du rapport (jolie mise en forme)
pub fn export_report_json<P: AsRef<Path>>(path: P, report: &DeliveryReport) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(report)?;
    write_atomic(path.as_ref(), &json)
}

/// Export CSV : header `participant_id,display_name,contact,status,message_id,sent_at,error`
pub fn export_report_csv<P: AsRef<Path>>(path: P, report: &DeliveryReport) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record([
        "participant_id",
        "display_name",
        "contact",
        "status",
        "message_id",
        "sent_at",
        "error",
    ])?;
    for d in &report.deliveries {
        let (status, message_id, sent_at, error) = match &d.outcome {
            DeliveryOutcome::Sent {
                message_id,
                sent_at,
            } => (
                "sent",
                message_id.as_str().to_string(),
                sent_at.to_rfc3339(),
                String::new(),
            ),
            DeliveryOutcome::Failed { error } => {
                ("failed", String::new(), String::new(), error.clone())
            }
        };
        w.write_record([
            d.participant_id.as_str(),
            d.display_name.as_str(),
            d.contact.as_str(),
            status,
            message_id.as_str(),
            sent_at.as_str(),
            error.as_str(),
        ])?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv: {e}"))?;
    write_atomic(path.as_ref(), &bytes)
}
