use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bubbletea_refresh_list::prelude::*;
use bubbletea_rs::{KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Key(char),
    PullRefresh,
    Pointer(PointerKind, u16),
    RefreshDone(usize),
    LoadMoreDone(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let pointer_kind = prop_oneof![
        Just(PointerKind::Down),
        Just(PointerKind::Drag),
        Just(PointerKind::Up),
        Just(PointerKind::WheelUp),
        Just(PointerKind::WheelDown),
    ];
    prop_oneof![
        prop::sample::select(vec!['r', 'G', 'g', 'j', 'k', 'f', 'b', 'm']).prop_map(Op::Key),
        Just(Op::PullRefresh),
        (pointer_kind, 0u16..12).prop_map(|(kind, line)| Op::Pointer(kind, line)),
        (0usize..4).prop_map(Op::RefreshDone),
        (0usize..4).prop_map(Op::LoadMoreDone),
    ]
}

fn key(c: char) -> Msg {
    Box::new(KeyMsg {
        key: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
    })
}

fn build_list(items: usize, height: usize) -> (RefreshList<VecRows<String>>, Arc<AtomicUsize>) {
    let adapter = WrappingAdapter::builder()
        .provider(VecRows::new((0..items).map(|i| format!("item {i}")).collect()))
        .footer_view("Loading more…")
        .empty_view("No items")
        .build()
        .unwrap();
    let mut list = RefreshList::new(40, height).with_adapter(adapter);
    let calls = Arc::new(AtomicUsize::new(0));
    let refreshes = Arc::clone(&calls);
    list.set_on_pull_refresh_listener(move || {
        refreshes.fetch_add(1, Ordering::SeqCst);
        None
    });
    let loads = Arc::clone(&calls);
    list.set_on_load_more_listener(move || {
        loads.fetch_add(1, Ordering::SeqCst);
        None
    });
    list.set_on_item_click_listener(|_, _| None);
    (list, calls)
}

proptest! {
    #[test]
    fn test_refresh_and_load_more_never_overlap(
        items in 0usize..12,
        height in 1usize..8,
        ops in prop::collection::vec(op(), 1..120)
    ) {
        let (mut list, _) = build_list(items, height);
        let t0 = Instant::now();

        for (step, op) in ops.into_iter().enumerate() {
            match op {
                Op::Key(c) => {
                    list.update(key(c));
                }
                Op::PullRefresh => {
                    list.pull_refresh();
                }
                Op::Pointer(kind, line) => {
                    let at = t0 + Duration::from_millis(step as u64 * 40);
                    list.update(Box::new(PointerEvent::at(kind, 0, line, at)));
                }
                Op::RefreshDone(count) => {
                    let rows = list.adapter_mut().unwrap().inner_mut().items_mut();
                    for i in 0..count {
                        rows.insert(0, format!("new {step}.{i}"));
                    }
                    list.notify_refresh_completed(count).unwrap();
                }
                Op::LoadMoreDone(count) => {
                    let rows = list.adapter_mut().unwrap().inner_mut().items_mut();
                    for i in 0..count {
                        rows.push(format!("more {step}.{i}"));
                    }
                    list.notify_load_more_completed(count).unwrap();
                }
            }

            prop_assert!(!(list.is_refreshing() && list.is_loading_more()));
            let item_count = list.adapter().unwrap().item_count();
            if item_count > 0 {
                prop_assert!(list.cursor() < item_count);
            }
            prop_assert!(list.view().lines().count() <= height);
        }
    }

    #[test]
    fn test_each_trigger_calls_one_listener_once(
        items in 1usize..12,
        ops in prop::collection::vec(prop::sample::select(vec!['r', 'G', 'j', 'k']), 1..60)
    ) {
        let (mut list, calls) = build_list(items, 4);
        for c in ops {
            let idle = !list.is_refreshing() && !list.is_loading_more();
            let before = calls.load(Ordering::SeqCst);
            list.update(key(c));
            let started = calls.load(Ordering::SeqCst) - before;
            prop_assert!(started <= 1);
            if !idle {
                prop_assert_eq!(started, 0);
            }
        }
    }
}
