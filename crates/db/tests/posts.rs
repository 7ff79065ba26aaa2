//! Integration tests for post CRUD against a real database.

use penfolio_db::models::post::{CreatePost, UpdatePost};
use penfolio_db::repositories::PostRepo;
use sqlx::PgPool;

fn sample_post() -> CreatePost {
    CreatePost {
        title_primary: "My First Post".to_string(),
        title_secondary: Some("Min første post".to_string()),
        content_primary: "Some body text".to_string(),
        content_secondary: None,
        excerpt_primary: Some("A short teaser".to_string()),
        excerpt_secondary: None,
        cover_image: Some("/media/cover.jpg".to_string()),
        slug: None,
        is_published: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let created = PostRepo::create(&pool, &sample_post(), "my-first-post", Some(1))
        .await
        .unwrap();
    assert_eq!(created.slug, "my-first-post");
    assert_eq!(created.title_secondary.as_deref(), Some("Min første post"));
    assert!(!created.is_published, "drafts by default");
    assert_eq!(created.created_by, Some(1));

    let by_id = PostRepo::find_by_id(&pool, created.id).await.unwrap();
    assert!(by_id.is_some());

    let by_slug = PostRepo::find_by_slug(&pool, "my-first-post")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.id, created.id);

    let missing = PostRepo::find_by_slug(&pool, "no-such-slug").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_rejected(pool: PgPool) {
    PostRepo::create(&pool, &sample_post(), "taken", None)
        .await
        .unwrap();

    let err = PostRepo::create(&pool, &sample_post(), "taken", None)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert!(db_err
        .constraint()
        .is_some_and(|c| c.starts_with("uq_")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_preserves_other_fields(pool: PgPool) {
    let created = PostRepo::create(&pool, &sample_post(), "partial", None)
        .await
        .unwrap();

    let patch = UpdatePost {
        title_primary: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = PostRepo::update(&pool, created.id, &patch, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title_primary, "Renamed");
    assert_eq!(updated.content_primary, created.content_primary);
    assert_eq!(updated.excerpt_primary, created.excerpt_primary);
    assert_eq!(updated.cover_image, created.cover_image);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_post_returns_none(pool: PgPool) {
    let patch = UpdatePost {
        title_primary: Some("ghost".to_string()),
        ..Default::default()
    };
    let result = PostRepo::update(&pool, 424242, &patch, None).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_publication_filter(pool: PgPool) {
    for (slug, published) in [("one", true), ("two", false), ("three", true)] {
        let input = CreatePost {
            is_published: Some(published),
            ..sample_post()
        };
        PostRepo::create(&pool, &input, slug, None).await.unwrap();
    }

    let all = PostRepo::list(&pool, None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 3);

    let published = PostRepo::list(&pool, Some(true), 50, 0).await.unwrap();
    assert_eq!(published.len(), 2);

    let drafts = PostRepo::list(&pool, Some(false), 50, 0).await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].slug, "two");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: PgPool) {
    let created = PostRepo::create(&pool, &sample_post(), "deleted", None)
        .await
        .unwrap();

    assert!(PostRepo::delete(&pool, created.id).await.unwrap());
    assert!(PostRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());

    // Second delete is a no-op.
    assert!(!PostRepo::delete(&pool, created.id).await.unwrap());
}
