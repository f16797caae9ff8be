// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from a [`Subject`] to an async [`Stream`].
//!
//! ```
//! use relay_core::{StreamItem, Subject};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = Subject::<i32>::new();
//! let mut stream = subject.subscribe_stream();
//!
//! subject.feed(1).unwrap();
//! subject.feed(2).unwrap();
//! subject.complete().unwrap();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(2)));
//! assert_eq!(stream.next().await, None); // Subject completed
//! # }
//! ```

use crate::{Observer, StreamItem, Subject, Subscription};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::{Stream, StreamExt};
use relay_error::{RelayError, Result};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

// Forwards signals into an unbounded channel. A failed send means the receiving
// stream is gone, and dropping it released this subscription, so it is ignored.
struct ChannelObserver<T> {
    sender: UnboundedSender<StreamItem<T>>,
}

impl<T: Send> Observer<T> for ChannelObserver<T> {
    fn on_next(&self, value: T) -> Result<()> {
        let _ = self.sender.unbounded_send(StreamItem::Value(value));
        Ok(())
    }

    fn on_error(&self, error: RelayError) -> Result<()> {
        let _ = self.sender.unbounded_send(StreamItem::Error(error));
        self.sender.close_channel();
        Ok(())
    }

    fn on_completed(&self) -> Result<()> {
        self.sender.close_channel();
        Ok(())
    }
}

/// Stream of the signals a subject broadcasts after the stream was created.
///
/// Values arrive as `StreamItem::Value`, the terminal error as `StreamItem::Error`,
/// and completion ends the stream. The stream also ends when every clone of the
/// subject is dropped. Dropping the stream releases its subscription.
pub struct SubjectStream<T> {
    receiver: UnboundedReceiver<StreamItem<T>>,
    subscription: Subscription,
}

impl<T> SubjectStream<T> {
    /// The subscription backing this stream.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for SubjectStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    /// Subscribes and returns the signals as a [`Stream`].
    ///
    /// Late subscribers to a terminated subject get the replayed error (if any)
    /// followed by the end of the stream.
    #[track_caller]
    pub fn subscribe_stream(&self) -> SubjectStream<T> {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = self.subscribe(Arc::new(ChannelObserver { sender }));
        SubjectStream {
            receiver,
            subscription,
        }
    }
}
