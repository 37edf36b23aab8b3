//! Client Module
//!
//! Owns the connection lifecycle for one device.
//!
//! ## Responsibilities
//! - Connect and log in, retrying with backoff
//! - Run the blocking receive loop while connected
//! - Answer PINGs and route HARDWARE frames to pin handlers
//! - Run the heartbeat thread for the lifetime of [`Client::run`]
//!
//! ## Lifecycle
//! ```text
//! Disconnected ──► Connecting ──login ok──► Connected ──┬─ read error / close ─► Disconnected ─┐
//!                      ▲  │                              └─ error status ───────► Error ────────┤
//!                      │  └─ failure: backoff, retry                                            │
//!                      └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport and protocol failures are logged and recovered by reconnecting.
//! The only way out of [`Client::run`] is a failing on-connect callback.

use std::io::BufReader;
use std::net::TcpStream;
use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{CallbackError, PinwireError, Result};
use crate::handler::{self, Dispatcher, PinReader, PinWriter, ReaderFn, WriterFn};
use crate::network::{self, heartbeat, AtomicState, Backoff, ConnectionState, Outbound};
use crate::protocol::{read_frame, Body, Command, Field, Message, StatusCode};

/// Callback run after every successful login, with the connection count
pub type ConnectCallback = dyn Fn(u32) -> std::result::Result<(), CallbackError> + Send + Sync;

/// Handle to a device client
///
/// Cheap to clone; clones share the same connection, so handlers and the
/// on-connect callback can capture one to send frames.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,

    /// Read lock-free by the heartbeat
    state: AtomicState,

    /// Send synchronizer holding the write half
    outbound: Outbound<TcpStream>,

    dispatcher: Dispatcher,

    on_connect: RwLock<Option<Arc<ConnectCallback>>>,
}

impl Client {
    /// Create a client for `address` with default timings
    pub fn new(address: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self::with_config(
            Config::builder()
                .address(address)
                .auth_token(auth_token)
                .build(),
        )
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                state: AtomicState::new(ConnectionState::Disconnected),
                outbound: Outbound::new(),
                dispatcher: Dispatcher::new(),
                on_connect: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.load()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    // =========================================================================
    // Handler Registration
    // =========================================================================

    pub fn register_reader(&self, pin: u32, reader: impl PinReader + 'static) {
        self.inner.dispatcher.register_reader(pin, Arc::new(reader));
    }

    pub fn register_reader_fn<F>(&self, pin: u32, f: F)
    where
        F: Fn(u32, &mut Body) + Send + Sync + 'static,
    {
        self.register_reader(pin, ReaderFn(f));
    }

    pub fn unregister_reader(&self, pin: u32) {
        self.inner.dispatcher.unregister_reader(pin);
    }

    pub fn register_writer(&self, pin: u32, writer: impl PinWriter + 'static) {
        self.inner.dispatcher.register_writer(pin, Arc::new(writer));
    }

    pub fn register_writer_fn<F>(&self, pin: u32, f: F)
    where
        F: Fn(u32, &Body) + Send + Sync + 'static,
    {
        self.register_writer(pin, WriterFn(f));
    }

    pub fn unregister_writer(&self, pin: u32) {
        self.inner.dispatcher.unregister_writer(pin);
    }

    /// Set the callback run after each successful login
    ///
    /// If it returns an error the connection is closed and [`Client::run`]
    /// returns; no reconnect is attempted.
    pub fn on_connect<F>(&self, callback: F)
    where
        F: Fn(u32) -> std::result::Result<(), CallbackError> + Send + Sync + 'static,
    {
        *self.inner.on_connect.write() = Some(Arc::new(callback));
    }

    // =========================================================================
    // Outbound
    // =========================================================================

    /// Send a frame through the send synchronizer
    pub fn send(&self, message: &mut Message) -> Result<u16> {
        self.inner.outbound.send(message)
    }

    /// Send an app notification
    pub fn notify(&self, text: impl Into<String>) -> Result<()> {
        let mut msg = Message::default();
        msg.build(Command::Notify).push_str(text);
        self.send(&mut msg).map(|_| ())
    }

    /// Report values for a virtual pin
    pub fn virtual_write<I>(&self, pin: u32, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        let mut msg = handler::virtual_write_frame(pin);
        for value in values {
            msg.body.push(value);
        }
        self.send(&mut msg).map(|_| ())
    }

    // =========================================================================
    // Run Loop
    // =========================================================================

    /// Run the client on the calling thread
    ///
    /// Blocks for the life of the client. Returns only when the on-connect
    /// callback fails, or `Err(Io)` if the heartbeat thread cannot start.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Starting pinwire v{}", crate::VERSION);

        let (stop_tx, stop_rx) = crossbeam::channel::bounded::<()>(0);
        let heartbeat_thread = {
            let client = self.clone();
            heartbeat::spawn(self.inner.config.heartbeat_tick, stop_rx, move || {
                client.heartbeat_tick()
            })?
        };

        let result = self.run_cycle();

        drop(stop_tx);
        if heartbeat_thread.join().is_err() {
            tracing::warn!("Heartbeat thread panicked");
        }
        result
    }

    fn run_cycle(&self) -> Result<()> {
        let address = &self.inner.config.address;
        let mut connection_count: u32 = 0;

        loop {
            let mut reader = self.connect_with_backoff();

            connection_count += 1;
            tracing::info!(
                "Connected and authenticated to {}, connection cycle {}",
                address,
                connection_count
            );

            let callback = self.inner.on_connect.read().clone();
            if let Some(callback) = callback {
                if let Err(e) = callback(connection_count) {
                    tracing::error!("On-connect callback returned an error: {}", e);
                    self.close_transport();
                    self.inner.state.store(ConnectionState::Disconnected);
                    return Err(PinwireError::ConnectCallback(e.to_string()));
                }
            }

            self.receive_loop(&mut reader);

            tracing::info!("Closing connection to {}", address);
            self.close_transport();
            if self.state() != ConnectionState::Error {
                self.inner.state.store(ConnectionState::Disconnected);
            }
        }
    }

    /// Retry [`Client::connect`] until it succeeds
    ///
    /// Backoff starts fresh on every call, i.e. after every successful
    /// connection.
    fn connect_with_backoff(&self) -> BufReader<TcpStream> {
        let config = &self.inner.config;
        let mut backoff = Backoff::new(config.initial_backoff, config.max_backoff);

        loop {
            match self.connect() {
                Ok(reader) => return reader,
                Err(e) => {
                    let delay = backoff.next_delay();
                    tracing::warn!("Connection to {} failed: {}", config.address, e);
                    tracing::info!("Waiting {:?} before attempting to reconnect", delay);
                    thread::sleep(delay);
                }
            }
        }
    }

    /// One connect + login attempt
    fn connect(&self) -> Result<BufReader<TcpStream>> {
        let config = &self.inner.config;
        self.inner.state.store(ConnectionState::Connecting);

        let (mut reader, writer) = network::open(&config.address, config.tcp_nodelay)?;
        tracing::info!("Connected to {}", config.address);

        if let Some(stale) = self.inner.outbound.attach(writer) {
            network::close(&stale);
        }

        match self.login(&mut reader) {
            Ok(()) => {
                self.inner.state.store(ConnectionState::Connected);
                Ok(reader)
            }
            Err(e) => {
                self.close_transport();
                Err(e)
            }
        }
    }

    fn login(&self, reader: &mut BufReader<TcpStream>) -> Result<()> {
        let config = &self.inner.config;

        let mut msg = Message::default();
        msg.build(Command::Login).push_str(config.auth_token.as_str());
        self.send(&mut msg)?;

        let response = read_frame(reader, config.recv_buffer_size)?;
        match response.status() {
            Some(status) if status.is_success() => Ok(()),
            Some(status) => Err(PinwireError::Rejected(status)),
            None => Err(PinwireError::Protocol(format!(
                "expected login response, got {}",
                response
            ))),
        }
    }

    fn close_transport(&self) {
        if let Some(stream) = self.inner.outbound.detach() {
            network::close(&stream);
        }
    }

    fn receive_loop(&self, reader: &mut BufReader<TcpStream>) {
        let capacity = self.inner.config.recv_buffer_size;

        while self.is_connected() {
            let msg = match read_frame(reader, capacity) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("Receive failed: {}", e);
                    break;
                }
            };
            tracing::debug!("Received message {}", msg);
            self.handle_frame(msg);
        }
    }

    fn handle_frame(&self, msg: Message) {
        match msg.command() {
            Some(Command::Response) => {
                let status = StatusCode(msg.header.length);
                if !status.is_success() {
                    tracing::warn!("Received error status {}", status);
                    self.inner.state.store(ConnectionState::Error);
                }
            }
            Some(Command::Hardware) => {
                if let Some(mut reply) = self.inner.dispatcher.dispatch(msg.body) {
                    if let Err(e) = self.send(&mut reply) {
                        tracing::warn!("Failed to answer virtual pin read: {}", e);
                    }
                }
            }
            Some(Command::Ping) => {
                // Id 0 takes the next outbound id, like any other send
                let mut reply = Message::response(0, StatusCode::SUCCESS);
                if let Err(e) = self.send(&mut reply) {
                    tracing::warn!("Failed to answer ping: {}", e);
                }
            }
            _ => tracing::debug!("Ignoring command {}", msg.header.command),
        }
    }

    fn heartbeat_tick(&self) {
        let idle = self.inner.outbound.idle_for();
        if !heartbeat::ping_due(self.state(), idle, self.inner.config.ping_interval) {
            return;
        }

        // Re-checked under the send lock: a reconnect may have attached a
        // transport that has not logged in yet
        let mut ping = Message::new(Command::Ping);
        match self.inner.outbound.send_if(&mut ping, || self.is_connected()) {
            Ok(Some(_)) => {}
            Ok(None) => tracing::debug!("Heartbeat ping skipped, not connected"),
            Err(e) => tracing::warn!("Heartbeat ping failed: {}", e),
        }
    }
}
