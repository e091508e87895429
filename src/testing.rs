//! Test doubles: a canned-response http server and a recording chat reply

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serenity::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::HoroscopeConfig;
use crate::embeds::Embed;
use crate::horoscope::{DeferredResponse, HoroscopeClient};

pub const DAILY_PAGE: &str = r#"<html><body>
<div class="main-horoscope">
  <p><strong>Oct 15, 2026</strong> - Your natural leadership will shine today.</p>
  <p>Second paragraph that should be ignored.</p>
</div>
</body></html>"#;

pub const STAR_PAGE: &str = r#"<html><body>
<div class="module-skin">
  <h3>Overall
    <i class="icon-star-filled highlight"></i><i class="icon-star-filled highlight"></i><i class="icon-star-filled highlight"></i><i class="icon-star-filled"></i><i class="icon-star-filled"></i>
  </h3>
  <p>A balanced day.</p>
  <h3>Love
    <i class="icon-star-filled highlight"></i><i class="icon-star-filled highlight"></i><i class="icon-star-filled highlight"></i><i class="icon-star-filled highlight"></i><i class="icon-star-filled highlight"></i>
  </h3>
  <p>Great connections.</p>
</div>
</body></html>"#;

/// Star rating page with the given `(label, filled, total, description)` categories
pub fn star_page(categories: &[(&str, usize, usize, &str)]) -> String {
    let mut body = String::from(r#"<html><body><div class="module-skin">"#);
    for (label, filled, total, description) in categories {
        body += &format!("<h3>{label} ");
        body += &r#"<i class="icon-star-filled highlight"></i>"#.repeat(*filled);
        body += &r#"<i class="icon-star-filled"></i>"#.repeat(total - filled);
        body += &format!("</h3><p>{description}</p>");
    }
    body += "</div></body></html>";
    body
}

pub fn client(base_url: &str) -> HoroscopeClient {
    HoroscopeClient::new(&HoroscopeConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

/// Serve `(request target, status, body)` routes on a local port, unknown targets get a 404
pub async fn serve(routes: Vec<(&str, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
        routes
            .into_iter()
            .map(|(target, status, body)| (target.to_string(), (status, body)))
            .collect(),
    );

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]);
                let target = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .get(target)
                    .cloned()
                    .unwrap_or((404, String::new()));
                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.ok();
                socket.shutdown().await.ok();
            });
        }
    });

    format!("http://{addr}")
}

/// Base url of a port nothing listens on
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Acknowledged,
    Edited(Embed),
    Ephemeral(Embed),
}

#[derive(Default)]
pub struct RecordingResponder {
    events: Mutex<Vec<Event>>,
    fail_edits: bool,
    reject_acknowledge: bool,
}

impl RecordingResponder {
    pub fn failing_edits() -> Self {
        Self {
            fail_edits: true,
            ..Self::default()
        }
    }

    /// Behaves like a reply some other handler already reserved
    pub fn already_acknowledged() -> Self {
        Self {
            reject_acknowledge: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<Embed> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Edited(embed) => Some(embed),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Embed> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Ephemeral(embed) => Some(embed),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl DeferredResponse for RecordingResponder {
    async fn acknowledge(&self) -> anyhow::Result<()> {
        if self.reject_acknowledge {
            anyhow::bail!("Interaction has already been acknowledged.");
        }
        self.record(Event::Acknowledged);
        Ok(())
    }

    async fn edit_original(&self, embed: Embed) -> anyhow::Result<()> {
        if self.fail_edits {
            anyhow::bail!("Unknown Webhook");
        }
        self.record(Event::Edited(embed));
        Ok(())
    }

    async fn send_ephemeral(&self, notice: Embed) -> anyhow::Result<()> {
        self.record(Event::Ephemeral(notice));
        Ok(())
    }
}
