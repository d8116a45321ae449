// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for validation tag storage
//!
//! - Tags survive reopening the database
//! - Keys are namespaced and never touch unrelated preferences

use island_core::{SqliteTagStore, TagStore};
use rusqlite::Connection;
use tempfile::TempDir;
use url::Url;

fn url(path: &str) -> Url {
    Url::parse(&format!("https://raw.githubusercontent.com/SwiftIsland/app/refs/heads/main/{path}"))
        .unwrap()
}

#[test]
fn test_tags_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("preferences.db");

    {
        let store = SqliteTagStore::open(&db).unwrap();
        store.set(Some("\"abc\""), &url("api/faq.json")).unwrap();
    }

    let store = SqliteTagStore::open(&db).unwrap();
    assert_eq!(
        store.get(&url("api/faq.json")).unwrap().as_deref(),
        Some("\"abc\"")
    );
}

#[test]
fn test_tags_are_keyed_by_full_url() {
    let store = SqliteTagStore::in_memory().unwrap();
    let main = url("api/faq.json");
    let other_branch =
        Url::parse("https://raw.githubusercontent.com/SwiftIsland/app/refs/heads/dev/api/faq.json")
            .unwrap();

    store.set(Some("main-tag"), &main).unwrap();

    assert_eq!(store.get(&main).unwrap().as_deref(), Some("main-tag"));
    assert_eq!(store.get(&other_branch).unwrap(), None);
}

#[test]
fn test_removing_tag_leaves_other_preferences() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("preferences.db");
    let store = SqliteTagStore::open(&db).unwrap();

    let conn = Connection::open(&db).unwrap();
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES ('theme', 'dark')",
        [],
    )
    .unwrap();

    store.set(Some("\"v1\""), &url("api/faq.json")).unwrap();
    store.set(None, &url("api/faq.json")).unwrap();

    assert_eq!(store.get(&url("api/faq.json")).unwrap(), None);
    let theme: String = conn
        .query_row("SELECT value FROM preferences WHERE key = 'theme'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(theme, "dark");

    let tag_key: String = {
        store.set(Some("\"v2\""), &url("api/faq.json")).unwrap();
        conn.query_row(
            "SELECT key FROM preferences WHERE value = '\"v2\"'",
            [],
            |row| row.get(0),
        )
        .unwrap()
    };
    assert!(tag_key.starts_with(island_core::sync::TAG_KEY_PREFIX));
}

#[test]
fn test_removing_unknown_tag_is_not_an_error() {
    let store = SqliteTagStore::in_memory().unwrap();
    store.set(None, &url("api/never-seen.json")).unwrap();
    assert_eq!(store.get(&url("api/never-seen.json")).unwrap(), None);
}
