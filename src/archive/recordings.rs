use super::models::Recording;
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;
use std::collections::HashMap;

pub(crate) const CONCERT_RECORDINGS_SQL: &str = concat!(
    "SELECT r.recording_id, st.source_name, rt.recording_name, r.taper, r.length, ",
    "r.lineage, r.notes, r.complete ",
    "FROM recordings r ",
    "JOIN concert_recording_mapping crm ON crm.recording_id = r.recording_id ",
    "LEFT JOIN source_types st ON st.source_type_id = r.source_type_id ",
    "LEFT JOIN recording_types rt ON rt.recording_type_id = r.recording_type_id ",
    "WHERE crm.concert_id = ?1 ",
    "ORDER BY r.recording_id"
);

pub(crate) const PUBLIC_FILES_SQL: &str = concat!(
    "SELECT rf.recording_id, rf.file_url ",
    "FROM recording_files rf ",
    "JOIN concert_recording_mapping crm ON crm.recording_id = rf.recording_id ",
    "WHERE crm.concert_id = ?1 AND rf.is_public = 1 ",
    "ORDER BY rf.rowid"
);

pub(crate) const PREVIEW_URLS_SQL: &str = concat!(
    "SELECT p.recording_id, p.preview_url ",
    "FROM recording_preview_urls p ",
    "JOIN concert_recording_mapping crm ON crm.recording_id = p.recording_id ",
    "WHERE crm.concert_id = ?1 ",
    "ORDER BY p.rowid"
);

/// Recordings linked to a concert, each with its public files and previews.
///
/// Files not marked public are never listed.
pub fn concert_recordings(
    session: &dyn StoreSession,
    concert_id: i64,
) -> Result<Vec<Recording>, StoreError> {
    let mut recordings = session
        .query(CONCERT_RECORDINGS_SQL, query_params![concert_id])?
        .iter()
        .map(Recording::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    if recordings.is_empty() {
        return Ok(recordings);
    }

    let index: HashMap<i64, usize> = recordings
        .iter()
        .enumerate()
        .map(|(position, recording)| (recording.id, position))
        .collect();

    for row in session.query(PUBLIC_FILES_SQL, query_params![concert_id])? {
        if let Some(position) = index.get(&row.get_i64("recording_id")?) {
            recordings[*position].files.push(row.get_text("file_url")?);
        }
    }
    for row in session.query(PREVIEW_URLS_SQL, query_params![concert_id])? {
        if let Some(position) = index.get(&row.get_i64("recording_id")?) {
            recordings[*position]
                .preview_urls
                .push(row.get_text("preview_url")?);
        }
    }

    Ok(recordings)
}
