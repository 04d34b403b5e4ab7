use session_actor::{FrameworkError, SessionActor, SessionConfig, SessionEntity};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, Default, PartialEq)]
struct Basket {
    items: Vec<String>,
}

#[derive(Debug)]
enum BasketAction {
    Add(String),
    Clear,
}

#[derive(Debug, thiserror::Error)]
enum BasketError {
    #[error("basket for {0} is locked")]
    Locked(String),
}

#[async_trait]
impl SessionEntity for Basket {
    type Key = String;
    type Action = BasketAction;
    type ActionResult = usize;
    type Context = ();
    type Error = BasketError;

    async fn on_open(&mut self, key: &String, _ctx: &()) -> Result<(), Self::Error> {
        if key.starts_with("locked") {
            return Err(BasketError::Locked(key.clone()));
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BasketAction, _ctx: &()) -> Result<usize, Self::Error> {
        match action {
            BasketAction::Add(item) => self.items.push(item),
            BasketAction::Clear => self.items.clear(),
        }
        Ok(self.items.len())
    }
}

fn no_eviction() -> SessionConfig {
    SessionConfig {
        idle_ttl: None,
        ..SessionConfig::default()
    }
}

#[tokio::test]
async fn test_concurrent_upserts_on_one_session_lose_nothing() {
    let (actor, client) = SessionActor::<Basket>::new(no_eviction());
    let handle = tokio::spawn(actor.run(()));

    let mut tasks = vec![];
    for i in 0..50 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client
                .upsert("shared".to_string(), BasketAction::Add(format!("item_{}", i)))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let basket = client.get("shared".to_string()).await.unwrap().unwrap();
    assert_eq!(basket.items.len(), 50);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (actor, client) = SessionActor::<Basket>::new(no_eviction());
    tokio::spawn(actor.run(()));

    client.upsert("a".to_string(), BasketAction::Add("tea".into())).await.unwrap();
    client.upsert("b".to_string(), BasketAction::Add("coffee".into())).await.unwrap();
    client.perform_action("a".to_string(), BasketAction::Clear).await.unwrap();

    let a = client.get("a".to_string()).await.unwrap().unwrap();
    let b = client.get("b".to_string()).await.unwrap().unwrap();
    assert!(a.items.is_empty());
    assert_eq!(b.items, vec!["coffee".to_string()]);
}

#[tokio::test]
async fn test_on_open_rejection_surfaces_as_entity_error() {
    let (actor, client) = SessionActor::<Basket>::new(no_eviction());
    tokio::spawn(actor.run(()));

    let result = client
        .upsert("locked-1".to_string(), BasketAction::Add("tea".into()))
        .await;

    match result {
        Err(FrameworkError::EntityError(e)) => assert!(e.to_string().contains("locked-1")),
        other => panic!("Expected EntityError, got {:?}", other),
    }
    assert_eq!(client.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = SessionActor::<Basket>::new(no_eviction());
    drop(actor);

    let result = client.get("a".to_string()).await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
