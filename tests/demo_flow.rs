//! Plays a small app around the refresh list: a fake network answers refresh
//! requests after one second and load-more requests after half a second,
//! each with one new row.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bubbletea_refresh_list::deferred::Deferred;
use bubbletea_refresh_list::prelude::*;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use pretty_assertions::assert_eq;

const REFRESH_LATENCY: Duration = Duration::from_millis(1000);
const LOAD_MORE_LATENCY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Refresh,
    LoadMore,
}

struct App {
    list: RefreshList<VecRows<String>>,
    requests: Arc<Mutex<Vec<Request>>>,
    network: Deferred<Request>,
    refreshed: usize,
    loaded: usize,
}

impl App {
    fn resize(&mut self, width: usize, height: usize) -> Option<Cmd> {
        let cmd = self.list.set_size(width, height);
        join(cmd, self.send_requests())
    }

    /// Moves listener requests onto the fake network.
    fn send_requests(&mut self) -> Option<Cmd> {
        let requests: Vec<Request> = self.requests.lock().unwrap().drain(..).collect();
        let mut cmd = None;
        for request in requests {
            let latency = match request {
                Request::Refresh => REFRESH_LATENCY,
                Request::LoadMore => LOAD_MORE_LATENCY,
            };
            let handle = self.network.schedule(latency, request);
            cmd = join(cmd, self.network.tick_cmd(handle));
        }
        cmd
    }

    fn advance(&mut self, by: Duration) {
        for response in self.network.advance(by) {
            self.respond(response);
        }
    }

    fn respond(&mut self, request: Request) {
        let rows = self.list.adapter_mut().unwrap().inner_mut().items_mut();
        match request {
            Request::Refresh => {
                self.refreshed += 1;
                rows.insert(0, format!("refreshed item {}", self.refreshed));
                self.list.notify_refresh_completed(1).unwrap();
            }
            Request::LoadMore => {
                self.loaded += 1;
                rows.push(format!("more item {}", self.loaded));
                self.list.notify_load_more_completed(1).unwrap();
            }
        }
    }

    fn lines(&self) -> Vec<String> {
        lipgloss_extras::lipgloss::strip_ansi(&self.view())
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect()
    }
}

fn join(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
    match (a, b) {
        (Some(a), Some(b)) => Some(bubbletea_rs::batch(vec![a, b])),
        (a, b) => a.or(b),
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let items = (1..=20).map(|i| format!("item {i}")).collect();
        let adapter = WrappingAdapter::builder()
            .provider(VecRows::new(items))
            .footer_view("Loading more…")
            .empty_view("Nothing to show")
            .build()
            .unwrap();
        let mut list = RefreshList::new(0, 0).with_adapter(adapter);

        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&requests);
        list.set_on_pull_refresh_listener(move || {
            sink.lock().unwrap().push(Request::Refresh);
            None
        });
        let sink = Arc::clone(&requests);
        list.set_on_load_more_listener(move || {
            sink.lock().unwrap().push(Request::LoadMore);
            None
        });
        let cmd = list.pull_refresh();

        let app = Self {
            list,
            requests,
            network: Deferred::new(),
            refreshed: 0,
            loaded: 0,
        };
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(response) = self.network.update(&msg) {
            self.respond(response);
            return None;
        }
        let cmd = self.list.update(msg);
        join(cmd, self.send_requests())
    }

    fn view(&self) -> String {
        self.list.view()
    }
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn refresh_on_start_then_load_more() {
    let (mut app, cmd) = App::init();
    assert!(cmd.is_none());
    assert!(!app.list.is_refreshing());

    // The refresh requested in init runs with the first layout.
    assert!(app.resize(40, 6).is_some());
    assert!(app.list.is_refreshing());
    assert_eq!(app.network.pending(), 1);
    assert!(app.lines()[0].ends_with("Refreshing…"));

    app.advance(REFRESH_LATENCY - Duration::from_millis(1));
    assert!(app.list.is_refreshing());
    app.advance(Duration::from_millis(1));
    assert!(!app.list.is_refreshing());
    assert_eq!(app.lines()[0], "refreshed item 1");
    assert_eq!(app.list.adapter().unwrap().item_count(), 21);

    app.update(key(KeyCode::Char('G')));
    assert!(app.list.is_loading_more());
    assert_eq!(app.lines().last().map(String::as_str), Some("Loading more…"));

    // A refresh is refused while loading more.
    app.update(key(KeyCode::Char('r')));
    assert!(!app.list.is_refreshing());
    assert_eq!(app.network.pending(), 1);

    app.advance(LOAD_MORE_LATENCY);
    assert!(!app.list.is_loading_more());
    assert_eq!(app.list.adapter().unwrap().item_count(), 22);
    assert_eq!(app.lines().last().map(String::as_str), Some("more item 1"));
    assert_eq!(app.list.cursor(), 21);
}

#[test]
fn cancelled_response_never_arrives() {
    let (mut app, _) = App::init();
    app.resize(40, 6);
    assert!(app.list.is_refreshing());

    app.network.cancel_all();
    app.advance(Duration::from_secs(5));
    assert!(app.list.is_refreshing());
    assert_eq!(app.list.adapter().unwrap().item_count(), 20);

    app.list.notify_refresh_completed(0).unwrap();
    assert!(!app.list.is_refreshing());
}

#[tokio::test]
async fn network_response_arrives_in_real_time() {
    let mut network = Deferred::new();
    let handle = network.schedule(Duration::from_millis(10), Request::LoadMore);
    let cmd = network.tick_cmd(handle).unwrap();

    let msg = cmd.await.unwrap();
    assert_eq!(network.update(&msg), Some(Request::LoadMore));
    assert_eq!(network.pending(), 0);
}
