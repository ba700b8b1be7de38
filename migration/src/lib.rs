pub use sea_orm_migration::prelude::*;

mod m20251017_000001_smiler_user;
mod m20251017_000002_smiler_rate;
mod m20251017_000003_smiler_comment;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_smiler_user::Migration),
            Box::new(m20251017_000002_smiler_rate::Migration),
            Box::new(m20251017_000003_smiler_comment::Migration),
        ]
    }
}
