// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal concrete [`BusClient`] transport: length-prefixed frames over a
//! shared TCP connection for publish/subscribe, plus HTTP admin calls for
//! topic/channel bootstrap.
//!
//! The real cluster message bus is an external collaborator (spec.md §1);
//! this transport exists so the capability interface has a working
//! implementation, not to model any specific production bus wire protocol.

use super::{BusClient, BusError, Subscription};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[derive(Serialize, Deserialize)]
struct Frame {
    topic: String,
    payload: Vec<u8>,
}

/// Client for the cluster message bus: publishes over a persistent TCP
/// connection to `producer_addr`, bootstraps topics/channels over HTTP
/// against `producer_rest_addr`.
pub struct TcpBusClient {
    producer_addr: String,
    producer_rest_addr: String,
    http: reqwest::Client,
    producer_conn: Mutex<Option<Arc<Mutex<TcpStream>>>>,
}

impl TcpBusClient {
    pub fn new(producer_addr: impl Into<String>, producer_rest_addr: impl Into<String>) -> Self {
        Self {
            producer_addr: producer_addr.into(),
            producer_rest_addr: producer_rest_addr.into(),
            http: reqwest::Client::new(),
            producer_conn: Mutex::new(None),
        }
    }

    async fn connection(&self) -> Result<Arc<Mutex<TcpStream>>, BusError> {
        if let Some(conn) = self.producer_conn.lock().clone() {
            return Ok(conn);
        }
        let stream = TcpStream::connect(&self.producer_addr)
            .await
            .map_err(|e| BusError::Connect(e.to_string()))?;
        let conn = Arc::new(Mutex::new(stream));
        *self.producer_conn.lock() = Some(Arc::clone(&conn));
        Ok(conn)
    }
}

#[async_trait]
impl BusClient for TcpBusClient {
    async fn create_topic(&self, topic: &str) -> Result<(), BusError> {
        let url = format!("{}/topic/create?topic={}", self.producer_rest_addr, topic);
        let resp = self.http.post(url).send().await.map_err(|e| BusError::Admin(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(BusError::Admin(format!("create_topic {topic}: HTTP {}", resp.status())));
        }
        Ok(())
    }

    async fn create_channel(&self, topic: &str, channel: &str) -> Result<(), BusError> {
        let url = format!(
            "{}/channel/create?topic={}&channel={}",
            self.producer_rest_addr, topic, channel
        );
        let resp = self.http.post(url).send().await.map_err(|e| BusError::Admin(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(BusError::Admin(format!(
                "create_channel {topic}/{channel}: HTTP {}",
                resp.status()
            )));
        }
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        let conn = self.connection().await?;
        let frame = Frame { topic: topic.to_string(), payload };
        let bytes = serde_json::to_vec(&frame).map_err(|e| BusError::Publish(e.to_string()))?;
        let len = bytes.len() as u32;

        let mut stream = conn.lock();
        stream.write_u32(len).await.map_err(|e| BusError::Publish(e.to_string()))?;
        stream.write_all(&bytes).await.map_err(|e| BusError::Publish(e.to_string()))?;
        Ok(())
    }

    async fn subscribe(
        &self,
        topic: &str,
        _channel: &str,
    ) -> Result<Box<dyn Subscription>, BusError> {
        let stream = TcpStream::connect(&self.producer_addr)
            .await
            .map_err(|e| BusError::Connect(e.to_string()))?;
        Ok(Box::new(TcpSubscription { reader: BufReader::new(stream), topic: topic.to_string() }))
    }
}

struct TcpSubscription {
    reader: BufReader<TcpStream>,
    topic: String,
}

#[async_trait]
impl Subscription for TcpSubscription {
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, BusError> {
        loop {
            let len = match self.reader.read_u32().await {
                Ok(len) => len,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(BusError::Connect(e.to_string())),
            };
            let mut buf = vec![0u8; len as usize];
            self.reader.read_exact(&mut buf).await.map_err(|e| BusError::Connect(e.to_string()))?;
            let frame: Frame =
                serde_json::from_slice(&buf).map_err(|e| BusError::Connect(e.to_string()))?;
            if frame.topic == self.topic {
                return Ok(Some(frame.payload));
            }
        }
    }
}
