use std::sync::Arc;

use blog_api::dtos::post_dtos::{PostCreate, PostEdit, PostSearch};
use blog_api::error::PostError;
use blog_api::repositories::memory::MemoryPostRepository;
use blog_api::repositories::post_repository::PostRepository;
use blog_api::services::post_service::PostService;

fn setup() -> (Arc<MemoryPostRepository>, PostService) {
    let repo = Arc::new(MemoryPostRepository::new());
    let service = PostService::new(repo.clone());
    (repo, service)
}

async fn seed_thirty(repo: &MemoryPostRepository) {
    for i in 1..=30 {
        repo.insert(&format!("제목 - {i}"), &format!("내용 - {i}"))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn write_stores_a_new_post() {
    let (repo, service) = setup();

    service
        .write(PostCreate {
            title: Some("제목입니다.".to_string()),
            content: Some("내용입니다.".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    let stored = repo.scan_desc(10, 0).await.unwrap();
    assert_eq!(stored[0].title, "제목입니다.");
    assert_eq!(stored[0].content, "내용입니다.");
}

#[tokio::test]
async fn get_returns_the_stored_fields() {
    let (repo, service) = setup();
    let id = repo.insert("foo", "bar").await.unwrap();

    let response = service.get(id).await.unwrap();

    assert_eq!(response.id, id);
    assert_eq!(response.title, "foo");
    assert_eq!(response.content, "bar");
}

#[tokio::test]
async fn get_unknown_id_fails_with_not_found() {
    let (repo, service) = setup();
    let id = repo.insert("foo", "bar").await.unwrap();

    let err = service.get(id + 1).await.unwrap_err();
    assert!(matches!(err, PostError::NotFound));
}

#[tokio::test]
async fn first_page_returns_newest_posts_first() {
    let (repo, service) = setup();
    seed_thirty(&repo).await;

    let posts = service
        .get_list(PostSearch { page: 1, size: 10 })
        .await
        .unwrap();

    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0].title, "제목 - 30");
    assert_eq!(posts[9].title, "제목 - 21");
}

#[tokio::test]
async fn page_zero_behaves_like_page_one() {
    let (repo, service) = setup();
    seed_thirty(&repo).await;

    let posts = service
        .get_list(PostSearch { page: 0, size: 10 })
        .await
        .unwrap();

    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0].title, "제목 - 30");
    assert_eq!(posts[9].title, "제목 - 21");
}

#[tokio::test]
async fn second_page_continues_the_descending_order() {
    let (repo, service) = setup();
    seed_thirty(&repo).await;

    let posts = service
        .get_list(PostSearch { page: 2, size: 10 })
        .await
        .unwrap();

    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0].title, "제목 - 20");
    assert_eq!(posts[9].title, "제목 - 11");
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let (repo, service) = setup();
    seed_thirty(&repo).await;

    let posts = service
        .get_list(PostSearch { page: 5, size: 10 })
        .await
        .unwrap();

    assert!(posts.is_empty());
}

#[tokio::test]
async fn oversized_page_size_is_clamped() {
    let (repo, service) = setup();
    seed_thirty(&repo).await;

    let posts = service
        .get_list(PostSearch {
            page: 1,
            size: 5000,
        })
        .await
        .unwrap();

    // limit clamps to 2000; with 30 rows the whole table comes back
    assert_eq!(posts.len(), 30);
    assert_eq!(posts[0].title, "제목 - 30");
}

#[tokio::test]
async fn edit_overwrites_provided_fields() {
    let (repo, service) = setup();
    let id = repo.insert("김완수", "백엔드").await.unwrap();

    service
        .edit(
            id,
            PostEdit {
                title: Some("강원".to_string()),
                content: Some("백엔드".to_string()),
            },
        )
        .await
        .unwrap();

    let changed = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(changed.title, "강원");
    assert_eq!(changed.content, "백엔드");
}

#[tokio::test]
async fn edit_keeps_fields_that_are_absent() {
    let (repo, service) = setup();
    let id = repo.insert("김완수", "백엔드").await.unwrap();

    service
        .edit(
            id,
            PostEdit {
                title: None,
                content: Some("개발자".to_string()),
            },
        )
        .await
        .unwrap();

    let changed = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(changed.title, "김완수");
    assert_eq!(changed.content, "개발자");
}

#[tokio::test]
async fn edit_unknown_id_fails_with_not_found() {
    let (repo, service) = setup();
    let id = repo.insert("김완수", "백엔드").await.unwrap();

    let err = service
        .edit(id + 1, PostEdit::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::NotFound));
}

#[tokio::test]
async fn delete_removes_exactly_one_post() {
    let (repo, service) = setup();
    let id = repo.insert("김완수", "백엔드").await.unwrap();
    repo.insert("other", "post").await.unwrap();

    service.delete(id).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_is_not_idempotent_on_errors() {
    let (repo, service) = setup();
    let id = repo.insert("김완수", "백엔드").await.unwrap();

    service.delete(id).await.unwrap();
    let err = service.delete(id).await.unwrap_err();
    assert!(matches!(err, PostError::NotFound));

    let err = service.get(id).await.unwrap_err();
    assert!(matches!(err, PostError::NotFound));
}

#[tokio::test]
async fn delete_unknown_id_fails_with_not_found() {
    let (repo, service) = setup();
    let id = repo.insert("김완수", "백엔드").await.unwrap();

    let err = service.delete(id + 1).await.unwrap_err();
    assert!(matches!(err, PostError::NotFound));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn clear_empties_the_store() {
    let (repo, _service) = setup();
    seed_thirty(&repo).await;

    repo.clear().await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 0);
}
