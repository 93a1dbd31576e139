//! Song repertoire repository. Songs keep their insertion order so the
//! repertoire reads the way the team built it; screens that want an
//! alphabetical view sort on their side.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::models::{NewSong, Song, SongPatch};
use crate::store::KeyValueStore;

/// Storage key holding the serialized song collection.
pub(crate) const SONGS_KEY: &str = "songs";

impl Record for Song {
    const KEY: &'static str = SONGS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch every song in insertion order.
pub fn fetch_all_songs(store: &dyn KeyValueStore) -> Result<Vec<Song>> {
    collection::load_or_empty(store).context("failed to load songs")
}

/// Look up a single song by id.
pub fn fetch_song(store: &dyn KeyValueStore, id: i64) -> Result<Option<Song>> {
    collection::find_by_id(store, id).context("failed to look up song")
}

/// Insert a brand new song. We echo the hydrated struct so callers can
/// update UI state without having to re-query storage.
pub fn create_song(store: &dyn KeyValueStore, song: NewSong) -> Result<Song> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Append, |id| Song {
        id,
        title: song.title,
        artist: song.artist,
        key: song.key,
        tempo: song.tempo,
        duration: song.duration,
        category: song.category,
        notes: song.notes,
        lyrics: song.lyrics,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert song")
}

/// Merge the patch into an existing song and refresh `updated_at`. An
/// unknown id is a silent no-op.
pub fn update_song(store: &dyn KeyValueStore, id: i64, patch: SongPatch) -> Result<()> {
    collection::modify(store, id, |song: &mut Song| {
        if let Some(title) = patch.title {
            song.title = title;
        }
        if let Some(artist) = patch.artist {
            song.artist = artist;
        }
        if let Some(key) = patch.key {
            song.key = key;
        }
        if let Some(tempo) = patch.tempo {
            song.tempo = tempo;
        }
        if let Some(duration) = patch.duration {
            song.duration = duration;
        }
        if let Some(category) = patch.category {
            song.category = category;
        }
        if let Some(notes) = patch.notes {
            song.notes = notes;
        }
        if let Some(lyrics) = patch.lyrics {
            song.lyrics = lyrics;
        }
        song.updated_at = Utc::now();
    })
    .context("failed to update song")
}

/// Remove a song. Deleting an unknown id is a silent no-op.
pub fn delete_song(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<Song>(store, id).context("failed to delete song")
}

/// Insert the starter repertoire when the collection is empty. The
/// emptiness check makes the seed idempotent; once a single song exists,
/// real or default, this never runs again.
pub(crate) fn seed_default_songs(store: &dyn KeyValueStore) -> Result<()> {
    if !fetch_all_songs(store)?.is_empty() {
        return Ok(());
    }

    tracing::debug!("seeding default songs");
    for song in default_songs() {
        create_song(store, song)?;
    }
    Ok(())
}

/// The four songs every fresh install starts with.
fn default_songs() -> Vec<NewSong> {
    vec![
        NewSong {
            title: "Je louerai l'Éternel".into(),
            artist: "Claude Fraysse".into(),
            key: "C".into(),
            tempo: "Medium".into(),
            duration: "3:30".into(),
            category: "Louange".into(),
            notes: String::new(),
            lyrics: String::new(),
        },
        NewSong {
            title: "À toi la gloire".into(),
            artist: "G. F. Haendel".into(),
            key: "D".into(),
            tempo: "Medium".into(),
            duration: "4:15".into(),
            category: "Louange".into(),
            notes: String::new(),
            lyrics: String::new(),
        },
        NewSong {
            title: "Compte les bienfaits".into(),
            artist: "J. Oatman".into(),
            key: "G".into(),
            tempo: "Fast".into(),
            duration: "3:45".into(),
            category: "Louange".into(),
            notes: String::new(),
            lyrics: String::new(),
        },
        NewSong {
            title: "Tel que je suis".into(),
            artist: "Charlotte Elliott".into(),
            key: "F".into(),
            tempo: "Slow".into(),
            duration: "3:10".into(),
            category: "Adoration".into(),
            notes: String::new(),
            lyrics: String::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample_song() -> NewSong {
        NewSong {
            title: "Amazing Grace".into(),
            artist: "J. Newton".into(),
            key: "G".into(),
            tempo: "Slow".into(),
            duration: "4:00".into(),
            category: "Adoration".into(),
            notes: String::new(),
            lyrics: String::new(),
        }
    }

    #[test]
    fn create_after_seed_takes_id_five() {
        let store = MemoryStore::new();
        seed_default_songs(&store).unwrap();

        let created = create_song(&store, sample_song()).unwrap();
        assert_eq!(created.id, 5);

        let fetched = fetch_song(&store, 5).unwrap().unwrap();
        assert_eq!(fetched.title, "Amazing Grace");
    }

    #[test]
    fn create_then_fetch_round_trips() {
        let store = MemoryStore::new();
        let created = create_song(&store, sample_song()).unwrap();
        let fetched = fetch_song(&store, created.id).unwrap().unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[test]
    fn songs_keep_insertion_order() {
        let store = MemoryStore::new();
        for title in ["premier", "deuxième", "troisième"] {
            let mut song = sample_song();
            song.title = title.into();
            create_song(&store, song).unwrap();
        }

        let titles: Vec<String> = fetch_all_songs(&store)
            .unwrap()
            .into_iter()
            .map(|song| song.title)
            .collect();
        assert_eq!(titles, ["premier", "deuxième", "troisième"]);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let store = MemoryStore::new();
        let created = create_song(&store, sample_song()).unwrap();

        update_song(
            &store,
            created.id,
            SongPatch {
                tempo: Some("Medium".into()),
                ..SongPatch::default()
            },
        )
        .unwrap();

        let updated = fetch_song(&store, created.id).unwrap().unwrap();
        assert_eq!(updated.tempo, "Medium");
        assert_eq!(updated.title, "Amazing Grace");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_on_unknown_id_is_a_no_op() {
        let store = MemoryStore::new();
        create_song(&store, sample_song()).unwrap();
        let before = fetch_all_songs(&store).unwrap();

        update_song(
            &store,
            999,
            SongPatch {
                title: Some("Ghost".into()),
                ..SongPatch::default()
            },
        )
        .unwrap();

        assert_eq!(fetch_all_songs(&store).unwrap(), before);
    }

    #[test]
    fn delete_removes_exactly_one_song() {
        let store = MemoryStore::new();
        let first = create_song(&store, sample_song()).unwrap();
        let mut other = sample_song();
        other.title = "Autre chant".into();
        create_song(&store, other).unwrap();

        delete_song(&store, first.id).unwrap();

        let remaining = fetch_all_songs(&store).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Autre chant");
    }

    #[test]
    fn seeding_twice_never_duplicates() {
        let store = MemoryStore::new();
        seed_default_songs(&store).unwrap();
        seed_default_songs(&store).unwrap();
        assert_eq!(fetch_all_songs(&store).unwrap().len(), 4);
    }
}
