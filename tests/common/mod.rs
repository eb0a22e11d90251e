//! Shared fixtures: a scripted in-memory `ListApi` and item builders.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, watch};
use uuid::Uuid;

use gradwork_lists::api::{ListApi, PageRequest};
use gradwork_lists::controller::{ListState, PagedFilteredListController};
use gradwork_lists::error::{ApiError, ApiResult};
use gradwork_lists::models::freelancers::Freelancer;
use gradwork_lists::models::teams::Team;
use gradwork_lists::models::{ITEMS_PER_PAGE, Page, PaginationMeta};

struct Scripted<T> {
    result: ApiResult<Page<T>>,
    gate: Option<Arc<Notify>>,
}

/// Replays queued responses in order and records every request it receives.
/// A gated response waits until its `Notify` is triggered.
pub struct MockListApi<T> {
    responses: Mutex<VecDeque<Scripted<T>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl<T> MockListApi<T> {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_page(&self, items: Vec<T>, current_page: u32, total_pages: u32) {
        self.push(Ok(page(items, current_page, total_pages)), None);
    }

    /// Queue a page that is only delivered once the returned gate is notified.
    pub fn push_gated_page(&self, items: Vec<T>, current_page: u32, total_pages: u32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(Ok(page(items, current_page, total_pages)), Some(gate.clone()));
        gate
    }

    pub fn push_error(&self, status: u16, message: &str) {
        self.push(
            Err(ApiError::Server {
                status,
                message: message.to_string(),
            }),
            None,
        );
    }

    pub fn push_gated_error(&self, status: u16, message: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(
            Err(ApiError::Server {
                status,
                message: message.to_string(),
            }),
            Some(gate.clone()),
        );
        gate
    }

    fn push(&self, result: ApiResult<Page<T>>, gate: Option<Arc<Notify>>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate });
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> ListApi<T> for MockListApi<T> {
    async fn fetch_page(&self, request: &PageRequest) -> ApiResult<Page<T>> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();

        let Some(scripted) = next else {
            return Err(ApiError::Server {
                status: 500,
                message: "no scripted response".to_string(),
            });
        };
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        scripted.result
    }
}

pub fn page<T>(items: Vec<T>, current_page: u32, total_pages: u32) -> Page<T> {
    let item_count = items.len() as u32;
    Page {
        items,
        meta: PaginationMeta {
            current_page,
            item_count: Some(item_count),
            total_items: u64::from(total_pages) * u64::from(ITEMS_PER_PAGE),
            items_per_page: ITEMS_PER_PAGE,
            total_pages,
        },
    }
}

pub fn freelancer(first_name: &str, last_name: &str) -> Freelancer {
    Freelancer {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        avatar_url: None,
        profession: None,
        skills: Vec::new(),
        country: None,
        hourly_rate: None,
        rating: None,
        experience_level: None,
        work_type: None,
        availability: None,
        created_at: Utc::now(),
    }
}

/// Freelancers named after single letters, handy for ordering assertions.
pub fn freelancers(names: &[&str]) -> Vec<Freelancer> {
    names.iter().map(|n| freelancer(n, "Test")).collect()
}

pub fn first_names(items: &[Freelancer]) -> Vec<String> {
    items.iter().map(|f| f.first_name.clone()).collect()
}

pub fn team(name: &str) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        members_count: 3,
        skills: Vec::new(),
        rating: None,
    }
}

/// Wait until the controller publishes a state matching `predicate`.
pub async fn wait_for_state<T, F>(controller: &PagedFilteredListController<T>, predicate: F) -> ListState<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnMut(&ListState<T>) -> bool,
{
    let mut rx: watch::Receiver<ListState<T>> = controller.subscribe();
    let state = rx.wait_for(predicate).await.expect("controller dropped");
    state.clone()
}
