use super::models::Artist;
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;
use tracing::debug;

pub(crate) const ARTIST_BY_SHORT_NAME_SQL: &str =
    "SELECT artist_id, artist_name, short_name FROM artists WHERE short_name = ?1";

pub fn find_artist(
    session: &dyn StoreSession,
    short_name: &str,
) -> Result<Option<Artist>, StoreError> {
    match session.query_opt(ARTIST_BY_SHORT_NAME_SQL, query_params![short_name])? {
        Some(row) => Artist::from_row(&row).map(Some),
        None => {
            debug!("No artist '{}'", short_name);
            Ok(None)
        }
    }
}
