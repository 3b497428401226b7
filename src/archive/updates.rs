use super::models::Update;
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;

/// A negative limit means no limit to SQLite.
pub(crate) const RECENT_UPDATES_SQL: &str = concat!(
    "SELECT u.update_date, u.blurb, c.concert_friendly_url, a.short_name ",
    "FROM updates u ",
    "JOIN concerts c ON c.concert_id = u.concert_id ",
    "JOIN artists a ON a.artist_id = c.artist_id ",
    "ORDER BY u.update_date DESC, c.concert_friendly_url ",
    "LIMIT ?1"
);

/// Newest updates first, across all artists. `None` returns them all.
pub fn recent_updates(
    session: &dyn StoreSession,
    limit: Option<usize>,
) -> Result<Vec<Update>, StoreError> {
    let limit = limit.map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));
    session
        .query(RECENT_UPDATES_SQL, query_params![limit])?
        .iter()
        .map(Update::from_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::archive::test_fixtures::*;

    #[test]
    fn updates_are_newest_first_then_by_concert() {
        let fixture = ArchiveFixture::rage();
        let session = fixture.session();

        let updates = recent_updates(session.as_ref(), None).unwrap();
        let keys: Vec<(&str, &str)> = updates
            .iter()
            .map(|u| (u.artist_short_name.as_str(), u.concert_slug.as_str()))
            .collect();
        assert_eq!(keys, vec![("rage", "b"), ("rage", "c"), ("rage", "a")]);
        assert_eq!(updates[0].date, NaiveDate::from_ymd_opt(2021, 5, 5).unwrap());
        assert_eq!(updates[0].blurb, None);
        assert_eq!(updates[2].blurb.as_deref(), Some("Added a recording"));
    }

    #[test]
    fn limit_is_honored() {
        let fixture = ArchiveFixture::rage();
        let session = fixture.session();

        assert_eq!(recent_updates(session.as_ref(), Some(2)).unwrap().len(), 2);
        assert!(recent_updates(session.as_ref(), Some(0)).unwrap().is_empty());
    }

    #[test]
    fn empty_archive_has_no_updates() {
        let fixture = ArchiveFixture::empty();
        let session = fixture.session();

        assert!(recent_updates(session.as_ref(), Some(15)).unwrap().is_empty());
    }
}
