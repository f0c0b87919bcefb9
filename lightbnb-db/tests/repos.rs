//! Repository integration tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored

use lightbnb_core::{NewProperty, NewUser, PropertyColumn, SearchOptions};
use lightbnb_db::{pool_from_env, DbError, PropertyRepo, ReservationRepo, UserRepo};
use sqlx::PgPool;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS properties (
    id SERIAL PRIMARY KEY,
    owner_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(255),
    description TEXT,
    thumbnail_photo_url VARCHAR(255),
    cover_photo_url VARCHAR(255),
    cost_per_night INTEGER NOT NULL DEFAULT 0,
    parking_spaces INTEGER NOT NULL DEFAULT 0,
    number_of_bathrooms INTEGER NOT NULL DEFAULT 0,
    number_of_bedrooms INTEGER NOT NULL DEFAULT 0,
    country VARCHAR(255),
    street VARCHAR(255),
    city VARCHAR(255),
    province VARCHAR(255),
    post_code VARCHAR(255),
    active BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS reservations (
    id SERIAL PRIMARY KEY,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    property_id INTEGER REFERENCES properties(id) ON DELETE CASCADE,
    guest_id INTEGER REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS property_reviews (
    id SERIAL PRIMARY KEY,
    guest_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
    property_id INTEGER REFERENCES properties(id) ON DELETE CASCADE,
    reservation_id INTEGER REFERENCES reservations(id) ON DELETE CASCADE,
    rating SMALLINT NOT NULL DEFAULT 0,
    message TEXT
);
"#;

async fn setup() -> PgPool {
    let pool = pool_from_env().await.expect("DATABASE_URL required");
    sqlx::raw_sql(SCHEMA).execute(&pool).await.expect("schema");
    pool
}

/// Unique per call so tests can share one database
fn unique(tag: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{tag}-{nanos}")
}

async fn new_user(pool: &PgPool) -> i32 {
    let email = format!("{}@example.com", unique("guest"));
    UserRepo::new(pool)
        .create(&NewUser::new("Guest", email, "hash"))
        .await
        .unwrap()
}

async fn review(pool: &PgPool, guest_id: i32, property_id: i32, rating: i16) -> i32 {
    let reservation_id: i32 = sqlx::query_scalar(
        "INSERT INTO reservations (start_date, end_date, property_id, guest_id)
         VALUES ('2026-01-01', '2026-01-05', $1, $2) RETURNING id",
    )
    .bind(property_id)
    .bind(guest_id)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(guest_id)
    .bind(property_id)
    .bind(reservation_id)
    .bind(rating)
    .execute(pool)
    .await
    .unwrap();

    reservation_id
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_lookup_user() {
    let pool = setup().await;
    let repo = UserRepo::new(&pool);
    let email = format!("{}@example.com", unique("ada"));

    let id = repo
        .create(&NewUser::new("Ada", email.clone(), "$2a$10$hash"))
        .await
        .unwrap();

    let by_id = repo.get_by_id(id).await.unwrap().expect("user by id");
    assert_eq!(by_id.name, "Ada");
    assert_eq!(by_id.email, email);
    assert_eq!(by_id.password, "$2a$10$hash");

    let by_email = repo.get_by_email(&email).await.unwrap().expect("user by email");
    assert_eq!(by_email.id, id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_user_is_none_not_error() {
    let pool = setup().await;
    let repo = UserRepo::new(&pool);

    assert!(repo.get_by_email("nobody@nowhere.invalid").await.unwrap().is_none());
    assert!(repo.get_by_id(-1).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_conflict() {
    let pool = setup().await;
    let repo = UserRepo::new(&pool);
    let user = NewUser::new("Ada", format!("{}@example.com", unique("dup")), "hash");

    repo.create(&user).await.unwrap();
    let err = repo.create(&user).await.unwrap_err();
    assert!(err.is_conflict(), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_property_returns_server_defaults() {
    let pool = setup().await;
    let property = NewProperty::new()
        .with(PropertyColumn::City, "Paris")
        .and_then(|p| p.with(PropertyColumn::CostPerNight, 10_000))
        .unwrap();

    let row = PropertyRepo::new(&pool).create(&property).await.unwrap();
    assert!(row.id > 0);
    assert_eq!(row.city.as_deref(), Some("Paris"));
    assert_eq!(row.cost_per_night, Some(10_000));
    assert_eq!(row.active, Some(true));
}

#[tokio::test]
#[ignore = "requires database"]
async fn store_failures_are_errors() {
    let pool = setup().await;
    // Owner does not exist, so the foreign key rejects the row
    let property = NewProperty::new()
        .with(PropertyColumn::OwnerId, i32::MAX)
        .unwrap();

    let err = PropertyRepo::new(&pool).create(&property).await.unwrap_err();
    assert!(matches!(err, DbError::Sqlx(_)), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_filters_on_average_rating() {
    let pool = setup().await;
    let owner = new_user(&pool).await;
    let guest = new_user(&pool).await;
    let city = unique("Vancouver");

    let repo = PropertyRepo::new(&pool);
    let mut ids = Vec::new();
    for cost in [5_000, 20_000] {
        let property = NewProperty::new()
            .with(PropertyColumn::OwnerId, owner)
            .and_then(|p| p.with(PropertyColumn::City, city.as_str()))
            .and_then(|p| p.with(PropertyColumn::CostPerNight, cost))
            .unwrap();
        ids.push(repo.create(&property).await.unwrap().id);
    }

    // Average 4.5 for the cheap listing, 3.0 for the expensive one; a single
    // 5-star review on the second must not let it through.
    review(&pool, guest, ids[0], 4).await;
    review(&pool, guest, ids[0], 5).await;
    review(&pool, guest, ids[1], 1).await;
    review(&pool, guest, ids[1], 5).await;

    let all = repo
        .search(&SearchOptions::default().city(city.as_str()), 10)
        .await
        .unwrap();
    assert_eq!(all.iter().map(|p| p.property.id).collect::<Vec<_>>(), ids);

    let rated = repo
        .search(&SearchOptions::default().city(city.as_str()).minimum_rating(4.0), 10)
        .await
        .unwrap();
    assert_eq!(rated.len(), 1);
    assert_eq!(rated[0].property.id, ids[0]);
    assert_eq!(rated[0].average_rating, Some(4.5));

    let cheap = repo
        .search(
            &SearchOptions::default()
                .owner_id(owner)
                .maximum_price_per_night(100),
            10,
        )
        .await
        .unwrap();
    assert_eq!(cheap.len(), 1);
    assert_eq!(cheap[0].property.cost_per_night, Some(5_000));
}

#[tokio::test]
#[ignore = "requires database"]
async fn reservations_respect_limit() {
    let pool = setup().await;
    let owner = new_user(&pool).await;
    let guest = new_user(&pool).await;

    let property = NewProperty::new()
        .with(PropertyColumn::OwnerId, owner)
        .and_then(|p| p.with(PropertyColumn::Title, "Cabin"))
        .unwrap();
    let property_id = PropertyRepo::new(&pool).create(&property).await.unwrap().id;
    for rating in [3, 4, 5] {
        review(&pool, guest, property_id, rating).await;
    }

    let repo = ReservationRepo::new(&pool);
    let rows = repo.list_for_guest(guest, 2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.guest_id == guest && r.property.id == property_id));

    // Every listing column comes through, including server defaults
    let listing = &rows[0].property;
    assert_eq!(listing.title.as_deref(), Some("Cabin"));
    assert_eq!(listing.owner_id, Some(owner));
    assert_eq!(listing.number_of_bedrooms, Some(0));
    assert_eq!(listing.active, Some(true));
    assert!(rows[0].review_message.is_none());

    // Three reservations, each fanned out over three reviews
    let all = repo.list_for_guest_default(guest).await.unwrap();
    assert_eq!(all.len(), 9);
}

#[tokio::test]
async fn validation_errors_never_reach_the_store() {
    // A lazy pool never connects, so reaching the store would fail differently
    let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();

    let err = PropertyRepo::new(&pool)
        .create(&NewProperty::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));

    let err = PropertyRepo::new(&pool)
        .search(&SearchOptions::default(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));

    let err = ReservationRepo::new(&pool).list_for_guest(1, -5).await.unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
}
