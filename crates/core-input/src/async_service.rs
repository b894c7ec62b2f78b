use crate::{log_paste, map_event};
use core_events::{CHANNEL_SEND_FAILURES, Event, InputEvent};
use crossterm::event::{Event as CEvent, EventStream};
use std::io;
use std::sync::Arc;
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task;
use tokio_stream::StreamExt;
use tracing::{info, trace, warn};

#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[derive(Clone, Debug)]
struct ShutdownListener {
    notify: Arc<Notify>,
}

impl ShutdownListener {
    fn new_pair() -> (AsyncInputShutdown, Self) {
        let notify = Arc::new(Notify::new());
        (
            AsyncInputShutdown {
                notify: notify.clone(),
            },
            ShutdownListener { notify },
        )
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

pub(crate) fn spawn_async_event_task(
    sender: Sender<Event>,
) -> (task::JoinHandle<()>, AsyncInputShutdown) {
    let (shutdown, listener) = ShutdownListener::new_pair();
    let handle = task::spawn(async move {
        let stream = EventStream::new();
        AsyncEventStreamTask::new(sender, stream, listener)
            .run()
            .await;
    });
    (handle, shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitReason {
    ShutdownSignal,
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ShutdownSignal => "shutdown_signal",
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
        }
    }
}

struct AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    sender: Sender<Event>,
    stream: S,
    shutdown: ShutdownListener,
}

impl<S> AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    fn new(sender: Sender<Event>, stream: S, shutdown: ShutdownListener) -> Self {
        Self {
            sender,
            stream,
            shutdown,
        }
    }

    async fn run(mut self) -> ExitReason {
        info!(target: "input.thread", "async_input_task_started");
        let reason = loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.wait() => break ExitReason::ShutdownSignal,
                next = self.stream.next() => next,
            };
            let event = match next {
                None => break ExitReason::StreamEnded,
                Some(Err(error)) => {
                    warn!(target: "input.thread", error_kind = ?error.kind(), "async_input_task_stream_error");
                    break ExitReason::StreamError;
                }
                Some(Ok(event)) => event,
            };
            let Some(input) = map_event(event) else {
                continue;
            };
            match &input {
                InputEvent::Paste(text) => log_paste(text),
                other => trace!(target: "input.event", event = ?other, "input"),
            }
            if self.sender.send(Event::Input(input)).await.is_err() {
                CHANNEL_SEND_FAILURES.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                break ExitReason::ChannelClosed;
            }
        };
        info!(target: "input.thread", reason = reason.as_str(), "async_input_task_stopped");
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyEvent;
    use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers};
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tokio::time::{Duration, timeout};
    use tracing_subscriber::fmt::MakeWriter;

    fn press(c: char) -> CEvent {
        CEvent::Key(CKeyEvent::new(CKeyCode::Char(c), KeyModifiers::NONE))
    }

    async fn run_scenario(events: Vec<CEvent>) -> (Vec<Event>, ExitReason) {
        let (tx, mut rx) = mpsc::channel(64);
        let stream = tokio_stream::iter(events.into_iter().map(Ok));
        let (_shutdown, listener) = ShutdownListener::new_pair();
        let reason = AsyncEventStreamTask::new(tx, stream, listener).run().await;
        let mut outputs = Vec::new();
        while let Some(evt) = rx.recv().await {
            outputs.push(evt);
        }
        (outputs, reason)
    }

    #[tokio::test]
    async fn forwards_keys_and_skips_releases() {
        let mut release = CKeyEvent::new(CKeyCode::Char('b'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        let (out, reason) =
            run_scenario(vec![press('a'), CEvent::Key(release), CEvent::Resize(10, 5)]).await;
        assert_eq!(reason, ExitReason::StreamEnded);
        assert!(matches!(
            out.as_slice(),
            [
                Event::Input(InputEvent::Key(k)),
                Event::Input(InputEvent::Resize(10, 5)),
            ] if *k == KeyEvent::char('a')
        ));
    }

    #[tokio::test]
    async fn stops_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let stream = tokio_stream::iter(vec![Ok(press('x'))]);
        let (_shutdown, listener) = ShutdownListener::new_pair();
        let reason = AsyncEventStreamTask::new(tx, stream, listener).run().await;
        assert_eq!(reason, ExitReason::ChannelClosed);
    }

    #[tokio::test]
    async fn stops_on_stream_error() {
        let (tx, _rx) = mpsc::channel(4);
        let stream = tokio_stream::iter(vec![Err(io::Error::other("tty gone"))]);
        let (_shutdown, listener) = ShutdownListener::new_pair();
        let reason = AsyncEventStreamTask::new(tx, stream, listener).run().await;
        assert_eq!(reason, ExitReason::StreamError);
    }

    #[tokio::test]
    async fn shutdown_signal_interrupts_pending_stream() {
        let (tx, _rx) = mpsc::channel(4);
        let stream = tokio_stream::pending::<io::Result<CEvent>>();
        let (shutdown, listener) = ShutdownListener::new_pair();
        // notify_one stores a permit, so signalling first is fine
        shutdown.signal();
        let reason = timeout(
            Duration::from_secs(1),
            AsyncEventStreamTask::new(tx, stream, listener).run(),
        )
        .await
        .expect("task should stop");
        assert_eq!(reason, ExitReason::ShutdownSignal);
    }

    #[derive(Clone, Default)]
    struct BufferWriter(std::sync::Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = BufferWriter;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn paste_log_omits_content() {
        let writer = BufferWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (out, _) = run_scenario(vec![CEvent::Paste("secret payload".into())]).await;
        assert!(matches!(out.as_slice(), [Event::Input(InputEvent::Paste(_))]));

        let logs = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("input.paste"), "{logs}");
        assert!(!logs.contains("secret payload"));
    }
}
