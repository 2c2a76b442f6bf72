//! WebSocket-based live preview updates.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages sent to connected configurator pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HmrMessage {
    /// The block document compiled; replace preview and code panes
    UpdateBlock {
        name: String,
        template: String,
        html: String,
        css: String,
        preview_html: String,
    },

    /// The block document failed to compile; the last good output stays up
    CompileFailed { message: String },

    /// Connection established
    Connected,
}

/// Hub for broadcasting messages to all connected clients.
#[derive(Debug, Clone)]
pub struct HmrHub {
    sender: broadcast::Sender<HmrMessage>,
}

impl HmrHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: HmrMessage) {
        // No receivers is fine
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HmrMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for HmrHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side script that applies live updates to the configurator page.
///
/// Only text and server-rendered preview markup are swapped in; no code is
/// evaluated on the client.
pub fn hmr_client_script(ws_path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const ws = new WebSocket('ws://' + location.host + '{}');
  let reconnectAttempts = 0;
  const maxReconnectAttempts = 10;

  function setText(id, text) {{
    const el = document.getElementById(id);
    if (el) el.textContent = text;
  }}

  ws.onopen = function() {{
    console.log('[tessera] Connected');
    reconnectAttempts = 0;
  }};

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);

    switch (msg.type) {{
      case 'update_block': {{
        const preview = document.getElementById('preview');
        if (!preview) {{
          location.reload();
          break;
        }}
        preview.innerHTML = msg.preview_html;
        setText('block-name', msg.name);
        setText('block-template', msg.template);
        setText('html-code', msg.html);
        setText('css-code', msg.css);
        setText('error', '');
        document.body.classList.remove('has-error');
        break;
      }}

      case 'compile_failed':
        setText('error', msg.message);
        document.body.classList.add('has-error');
        break;

      case 'connected':
        console.log('[tessera] Server acknowledged connection');
        break;
    }}
  }};

  ws.onclose = function() {{
    if (reconnectAttempts < maxReconnectAttempts) {{
      reconnectAttempts++;
      setTimeout(function() {{
        location.reload();
      }}, 1000 * reconnectAttempts);
    }}
  }};

  ws.onerror = function(e) {{
    console.error('[tessera] WebSocket error:', e);
  }};
}})();
"#,
        ws_path
    )
}
