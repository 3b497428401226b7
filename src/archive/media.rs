use super::models::{Media, MediaGroups};
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;

pub(crate) const CONCERT_MEDIA_SQL: &str = concat!(
    "SELECT mc.concert_id, mc.media_id, m.media_url, mt.media_type ",
    "FROM media_concert mc ",
    "JOIN media m ON m.media_id = mc.media_id ",
    "LEFT JOIN media_types mt ON mt.media_type_id = mc.media_type_id ",
    "WHERE mc.concert_id = ?1 ",
    "ORDER BY mc.media_id"
);

/// All media of a concert, grouped by category.
pub fn concert_media(
    session: &dyn StoreSession,
    concert_id: i64,
) -> Result<MediaGroups, StoreError> {
    let mut groups = MediaGroups::new();
    for row in session.query(CONCERT_MEDIA_SQL, query_params![concert_id])? {
        groups.push(Media::from_row(&row)?);
    }
    Ok(groups)
}
