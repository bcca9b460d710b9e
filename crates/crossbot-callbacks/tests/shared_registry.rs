// One registry is shared by every platform loop. These tests drive it the
// way adapters do: register at render time, resolve on a later press.

use std::sync::Arc;
use std::thread;

use crossbot_callbacks::{resolve, CallbackRegistry, Disposition};
use crossbot_core::config::RegistryConfig;
use crossbot_core::{Action, Callback, FieldMap, FnHandler, Message, Platform};

fn counter(fields: &FieldMap) -> Message {
    let n: u32 = fields.get("n").and_then(|v| v.parse().ok()).unwrap_or(0);
    Message::text(format!("{} by {}", n + 1, fields.get("user").unwrap_or("")))
}

fn increment(n: u32) -> Callback {
    let fields: FieldMap = [("n", n.to_string())].into_iter().collect();
    Callback::new(Action::EditMessage)
        .with_handler(Arc::new(FnHandler(counter)))
        .with_fields(&fields)
}

#[test]
fn press_from_another_platform_resolves() {
    let registry = CallbackRegistry::new(&RegistryConfig::default());
    let id = registry.register(increment(41));

    let discord = Arc::clone(&registry);
    let pressed = thread::spawn(move || {
        let cb = discord.lookup(&id).expect("callback is live");
        resolve(&cb, "alice", Platform::Discord)
    })
    .join()
    .unwrap();

    assert_eq!(pressed, Disposition::Edit(Message::text("42 by alice")));
}

#[test]
fn presses_and_registrations_interleave() {
    let registry = CallbackRegistry::new(&RegistryConfig::default());
    let ids: Vec<String> = (0..50).map(|n| registry.register(increment(n))).collect();

    let workers: Vec<_> = [Platform::Discord, Platform::Telegram, Platform::Guilded]
        .into_iter()
        .map(|platform| {
            let registry = Arc::clone(&registry);
            let ids = ids.clone();
            thread::spawn(move || {
                for (n, id) in ids.iter().enumerate() {
                    let cb = registry.lookup(id).expect("callback is live");
                    let expected = Message::text(format!("{} by {}", n + 1, platform));
                    assert_eq!(resolve(&cb, &platform.to_string(), platform), Disposition::Edit(expected));
                    registry.register(increment(0));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(registry.len(), 200);
}

#[test]
fn unknown_press_is_a_miss() {
    let registry = CallbackRegistry::new(&RegistryConfig::default());
    registry.register(increment(0));
    assert!(registry.lookup("999999").is_none());
}
