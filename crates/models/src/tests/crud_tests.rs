use crate::db::connect_in_memory;
use crate::user;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use anyhow::Result;

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    // Create
    let created = user::new_record("Anna", "anna@test.ru").insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, "Anna");
    assert_eq!(created.email, "anna@test.ru");

    // Read
    let found = user::Entity::find_by_id(created.id).one(&db).await?.expect("stored");
    assert_eq!(found, created);

    // Update
    let mut am: user::ActiveModel = found.into();
    am.name = Set("Anna K".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.name, "Anna K");
    assert_eq!(updated.created_at, created.created_at);

    // Delete
    user::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ids_are_generated_and_distinct() -> Result<()> {
    let db = connect_in_memory().await?;
    let a = user::new_record("A", "a@test.ru").insert(&db).await?;
    let b = user::new_record("B", "b@test.ru").insert(&db).await?;
    assert_ne!(a.id, b.id);
    assert_eq!(user::Entity::find().all(&db).await?.len(), 2);
    Ok(())
}
