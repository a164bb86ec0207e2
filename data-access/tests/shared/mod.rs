use data_access::DataAccess;
use sqlx::sqlite::SqlitePoolOptions;

pub async fn data_access() -> DataAccess {
    // every connection to `sqlite::memory:` is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("unable to connect to test db");

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("unable to run migrations");

    DataAccess::new(pool)
}

pub async fn insert_users(data_access: &DataAccess, usernames: &[&str]) {
    for username in usernames {
        sqlx::query("INSERT INTO users (username) VALUES (?)")
            .bind(*username)
            .execute(data_access.pool())
            .await
            .expect("unable to insert user");
    }
}
