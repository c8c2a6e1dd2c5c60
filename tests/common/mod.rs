#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use member_search::db::{DbPool, establish_connection_pool};
use member_search::domain::member::NewMember;
use member_search::domain::team::NewTeam;
use member_search::domain::types::TeamName;
use member_search::repository::{DieselRepository, MemberWriter, TeamWriter};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Temporary SQLite database with every migration applied. The file is
/// removed when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("create pool");
        {
            let mut conn = pool.get().expect("get connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("run migrations");
        }

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// teamA: member1 (10), member2 (20); teamB: member3 (30), member4 (40).
pub fn seed_members(repo: &DieselRepository) {
    let team_a = repo
        .create_team(&NewTeam::new(TeamName::new("teamA").unwrap()))
        .unwrap();
    let team_b = repo
        .create_team(&NewTeam::new(TeamName::new("teamB").unwrap()))
        .unwrap();

    let members = [
        NewMember::new("member1", 10).team(team_a.id),
        NewMember::new("member2", 20).team(team_a.id),
        NewMember::new("member3", 30).team(team_b.id),
        NewMember::new("member4", 40).team(team_b.id),
    ];
    for member in &members {
        repo.create_member(member).unwrap();
    }
}

/// Four members aged 10..40 that belong to no team.
pub fn seed_teamless_members(repo: &DieselRepository) {
    for (name, age) in [("member1", 10), ("member2", 20), ("member3", 30), ("member4", 40)] {
        repo.create_member(&NewMember::new(name, age)).unwrap();
    }
}
