//! Seeded site fixture for integration tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use folio_common::config::{SiteConfig, SourceConfig, SourceKind};
use folio_common::registry::ContentRegistry;
use folio_common::source::open_source;
use folio_web::{build_router, AppState};

pub const SITE_URL: &str = "https://example.com";

const COLUMNS: &str = "slug TEXT NOT NULL, title TEXT, category TEXT, category_slug TEXT, \
    start_date TEXT, end_date TEXT, updated_at TEXT, tags TEXT, status TEXT, \
    confidence TEXT, importance INTEGER, preview TEXT, state TEXT";

/// Content rows shared by the SQLite and JSON fixtures
///
/// - essays: `qualia`, `shared`, `undated` visible; `secret` hidden
/// - blog: `shared` (collides with the essay), `launch` (explicit category slug)
/// - verse: `tide`, categorized by verse type
/// - diary: one flat entry
const SEED_STATEMENTS: &[&str] = &[
    "INSERT INTO essays (slug, title, category, start_date, tags, preview) \
     VALUES ('qualia', 'On Qualia', 'Philosophy of Mind', '2024-03-01', '[\"mind\",\"perception\"]', 'What it is like.')",
    "INSERT INTO essays (slug, title, category, start_date, updated_at) \
     VALUES ('shared', 'Shared Essay', 'Ethics', '2023-01-01', '2023-02-01')",
    "INSERT INTO essays (slug, title, category, start_date, state) \
     VALUES ('secret', 'Secret Essay', 'Ethics', '2024-06-01', 'hidden')",
    "INSERT INTO essays (slug, title, category) VALUES ('undated', 'Undated Essay', 'Ethics')",
    "INSERT INTO blog (slug, title, category, start_date, state) \
     VALUES ('shared', 'Shared Post', 'Meta', '2024-05-01', 'active')",
    "INSERT INTO blog (slug, title, category, category_slug, start_date, tags) \
     VALUES ('launch', 'Launch', 'Site News!', 'site-news', '2024-02-01', 'meta, launch')",
    "INSERT INTO verse (slug, title, verse_type, start_date) \
     VALUES ('tide', 'Tide', 'Free Verse', '2022-07-04')",
    "INSERT INTO diary (slug, title, start_date) VALUES ('2024-05-01', 'Rain', '2024-05-01')",
];

/// Number of visible records in the seed data
pub const VISIBLE_RECORDS: usize = 7;

/// A router over freshly seeded content; the tempdir lives as long as the site
pub struct TestSite {
    pub router: Router,
    pub config: SiteConfig,
    _dir: TempDir,
}

impl TestSite {
    /// Site backed by a seeded SQLite database
    pub async fn sqlite() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("content.db");
        seed_database(&db_path).await;
        Self::build(dir, SourceKind::Sqlite, db_path)
    }

    /// Site backed by `{type}.json` files with the same records
    pub fn json() -> Self {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        write_json_fixture(&data);
        Self::build(dir, SourceKind::Json, data)
    }

    /// Site whose database file was never created
    pub fn missing_database() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("absent.db");
        Self::build(dir, SourceKind::Sqlite, db_path)
    }

    fn build(dir: TempDir, kind: SourceKind, path: PathBuf) -> Self {
        let content_root = dir.path().join("content");
        write_body(&content_root, "essays/philosophy-of-mind/qualia.mdx", "# On Qualia\n");
        write_body(&content_root, "diary/2024-05-01.md", "Rain all day.\n");

        let config = SiteConfig {
            site_url: SITE_URL.to_string(),
            title: "Test Site".to_string(),
            source: SourceConfig { kind, path },
            content_root: Some(content_root.clone()),
            ..Default::default()
        };

        let source = open_source(&config.source);
        let registry = ContentRegistry::scan(&content_root);
        let state = AppState::new(source, Arc::new(registry), config.clone());

        Self {
            router: build_router(state),
            config,
            _dir: dir,
        }
    }
}

async fn seed_database(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    for table in ["essays", "blog", "diary"] {
        sqlx::query(&format!("CREATE TABLE {} ({})", table, COLUMNS))
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query(&format!("CREATE TABLE verse ({}, verse_type TEXT)", COLUMNS))
        .execute(&pool)
        .await
        .unwrap();

    for statement in SEED_STATEMENTS {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
}

fn write_json_fixture(dir: &Path) {
    let essays = serde_json::json!([
        {
            "slug": "qualia", "title": "On Qualia", "category": "Philosophy of Mind",
            "startDate": "2024-03-01", "tags": ["mind", "perception"],
            "preview": "What it is like."
        },
        {
            "slug": "shared", "title": "Shared Essay", "category": "Ethics",
            "startDate": "2023-01-01", "updatedAt": "2023-02-01"
        },
        {
            "slug": "secret", "title": "Secret Essay", "category": "Ethics",
            "startDate": "2024-06-01", "state": "hidden"
        },
        { "slug": "undated", "title": "Undated Essay", "category": "Ethics" }
    ]);
    let blog = serde_json::json!([
        {
            "slug": "shared", "title": "Shared Post", "category": "Meta",
            "startDate": "2024-05-01", "state": "active"
        },
        {
            "slug": "launch", "title": "Launch", "category": "Site News!",
            "categorySlug": "site-news", "startDate": "2024-02-01",
            "tags": ["meta", "launch"]
        }
    ]);
    let verse = serde_json::json!([
        { "slug": "tide", "title": "Tide", "verseType": "Free Verse", "startDate": "2022-07-04" }
    ]);
    let diary = serde_json::json!([
        { "slug": "2024-05-01", "title": "Rain", "startDate": "2024-05-01" }
    ]);

    for (name, value) in [("essays", essays), ("blog", blog), ("verse", verse), ("diary", diary)] {
        std::fs::write(
            dir.join(format!("{}.json", name)),
            serde_json::to_string_pretty(&value).unwrap(),
        )
        .unwrap();
    }
}

fn write_body(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

/// Issue a GET against the router
pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Extract body as UTF-8 text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}
