use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct AppProps {
    pub angel_base_url: String,
}

pub fn render_html(angel_base_url: &str) -> String {
    let mut app = VirtualDom::new_with_props(
        App,
        AppProps {
            angel_base_url: angel_base_url.to_string(),
        },
    );
    // Build the tree before rendering to avoid SSR panics.
    let mut noop = NoOpMutations {};
    let _ = app.rebuild(&mut noop);
    dioxus_ssr::render(&mut app)
}

#[component]
fn App(props: AppProps) -> Element {
    let styles = r#"
:root {
    color-scheme: light;
}
* { box-sizing: border-box; }
body, html {
    margin: 0;
    padding: 0;
    background: radial-gradient(circle at 20% 20%, #171a24, #0b0d13 40%), #0b0d13;
}
.page { min-height: 100vh; display: flex; justify-content: center; padding: 36px 18px; color: #e9ecf5; font-family: "Space Grotesk", "Inter", system-ui, -apple-system, sans-serif; }
.shell { width: min(760px, 100%); display: flex; flex-direction: column; gap: 12px; }
.header { display: flex; flex-direction: column; gap: 6px; }
.title { font-size: 26px; margin: 0; letter-spacing: 0.4px; }
.subtitle { margin: 0; color: #9aa4bc; font-size: 15px; }
.tag { display: inline-flex; align-items: center; gap: 8px; width: fit-content; padding: 8px 12px; border-radius: 999px; background: #10131c; border: 1px solid #1f2431; color: #c5cee3; font-size: 14px; }
.content { display: flex; flex-direction: column; gap: 12px; }
.card { width: 100%; background: linear-gradient(145deg, #161a23, #0f1219); border: 1px solid #1f2230; border-radius: 16px; padding: 22px; box-shadow: 0 18px 44px rgba(0,0,0,0.35); }
.card-title { margin: 0 0 4px 0; font-size: 20px; }
.card-body { display: flex; flex-direction: column; gap: 10px; }
.muted { color: #8f98ac; margin: 0 0 16px 0; font-size: 14px; }
.alerts { display: flex; flex-direction: column; gap: 8px; }
.alert { display: flex; align-items: center; gap: 10px; padding: 12px 14px; border-radius: 12px; border: 1px solid #1f2230; background: #10141d; color: #dfe4f3; font-size: 14px; }
.alert span { flex: 1; }
.alert-info { border-color: #2b335a; }
.alert-success { border-color: #2f7d5c; background: #0f1a15; }
.alert-warning { border-color: #8a6d2f; background: #1a1610; }
.alert-danger { border-color: #ff4f64; background: #1a0f12; }
.alert-dismiss { border: none; background: none; color: #8f98ac; font-size: 16px; cursor: pointer; padding: 0 4px; }
.alert-dismiss:hover { color: #ffb5c2; }
.btn-row { display: flex; flex-wrap: wrap; gap: 10px; }
.control-btn { flex: 1; min-width: 120px; padding: 14px 16px; border-radius: 12px; border: none; font-weight: 800; font-size: 15px; letter-spacing: 0.3px; cursor: pointer; transition: transform 120ms ease, filter 120ms ease; }
.control-btn:active { transform: translateY(1px); filter: brightness(0.95); }
.control-btn:disabled { opacity: 0.45; cursor: not-allowed; }
.control-btn.start { background: linear-gradient(135deg, #3ddc97, #1fae72); color: #0a0c12; }
.control-btn.stop { background: linear-gradient(135deg, #ff5f7a, #ff3c5a); color: #0a0c12; }
.control-btn.restart { background: linear-gradient(135deg, #ffc86b, #ff9f45); color: #0a0c12; }
.pill-btn { padding: 10px 12px; border-radius: 10px; border: 1px solid #262b38; background: #0f1118; color: #dfe4f3; font-weight: 700; cursor: pointer; transition: all 120ms ease; }
.pill-btn:hover { border-color: #ff90a3; color: #ffb5c2; }
.status { margin-top: 4px; color: #8f98ac; font-size: 14px; min-height: 18px; }
.caption { margin: 0; color: #7c859c; font-size: 13px; }
.form-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 10px; }
.field { display: flex; flex-direction: column; gap: 6px; padding: 12px; background: #10141d; border: 1px solid #1f2230; border-radius: 12px; font-size: 13px; color: #9aa4bc; }
.field input[type="text"], .field input[type="number"] { padding: 8px 10px; border-radius: 8px; border: 1px solid #262b38; background: #0f1118; color: #e9ecf5; font-weight: 700; }
.field input[type="checkbox"] { width: 18px; height: 18px; }
.primary { width: 100%; margin-top: 12px; padding: 14px 16px; border-radius: 12px; border: none; background: linear-gradient(135deg, #ff5f7a, #ff3c5a); color: #0b0d12; font-weight: 800; font-size: 16px; letter-spacing: 0.3px; cursor: pointer; }
.primary:active { transform: translateY(1px); filter: brightness(0.95); }
@media (max-width: 640px) {
    .page { padding: 20px 14px; }
    .card { padding: 18px; }
    .title { font-size: 22px; }
    .control-btn { min-width: 100%; }
}
"#;

    let script = r#"
(() => {
  const alerts = document.getElementById('alerts');
  const startButton = document.getElementById('startButton');
  const stopButton = document.getElementById('stopButton');
  const restartButton = document.getElementById('restartButton');
  const refreshButton = document.getElementById('refreshButton');
  const captureStatus = document.getElementById('capture-status');
  const featureFlags = document.getElementById('feature-flags');
  const configForm = document.getElementById('configForm');
  const configFields = document.getElementById('config-fields');
  const configStatus = document.getElementById('config-status');

  function renderPanel(data) {
    if (typeof data.running === 'boolean') {
      if (startButton && stopButton) {
        startButton.disabled = data.running;
        stopButton.disabled = !data.running;
      }
      captureStatus.textContent = data.running ? 'Capture is running' : 'Capture is stopped';
    } else {
      captureStatus.textContent = 'Capture state unknown';
    }
    renderFlags(data.flags || {});
    renderAlerts(data.alerts || []);
  }

  function renderFlags(flags) {
    if (!featureFlags) return;
    const parts = [];
    if (typeof flags.video === 'boolean') parts.push(`video ${flags.video ? 'on' : 'off'}`);
    if (typeof flags.audio === 'boolean') parts.push(`audio ${flags.audio ? 'on' : 'off'}`);
    if (typeof flags.analysis === 'boolean') parts.push(`analysis ${flags.analysis ? 'on' : 'off'}`);
    featureFlags.textContent = parts.join(' / ');
  }

  function renderAlerts(list) {
    if (!alerts) return;
    alerts.innerHTML = '';
    list.forEach((item) => {
      const banner = document.createElement('div');
      banner.className = `alert alert-${item.severity}`;
      const text = document.createElement('span');
      text.textContent = item.message;
      banner.appendChild(text);
      const close = document.createElement('button');
      close.type = 'button';
      close.className = 'alert-dismiss';
      close.textContent = '×';
      close.addEventListener('click', () => dismissAlert(item.id));
      banner.appendChild(close);
      alerts.appendChild(banner);
    });
  }

  async function fetchPanel() {
    try {
      const res = await fetch('/api/panel');
      if (!res.ok) throw new Error('panel fetch failed');
      renderPanel(await res.json());
    } catch (err) {
      captureStatus.textContent = 'Unable to reach the panel';
    }
  }

  async function postAction(action) {
    try {
      const res = await fetch(`/api/capture/${action}`, { method: 'POST' });
      if (!res.ok) throw new Error('action failed');
      renderPanel(await res.json());
    } catch (err) {
      fetchPanel();
    }
  }

  async function dismissAlert(id) {
    try {
      await fetch(`/api/alerts/${id}/dismiss`, { method: 'POST' });
    } catch (err) {
      // Banner will be re-rendered from the next poll either way.
    }
    fetchPanel();
  }

  [startButton, stopButton, restartButton].forEach((btn) => {
    btn?.addEventListener('click', () => postAction(btn.dataset.action));
  });

  refreshButton?.addEventListener('click', async () => {
    try {
      const res = await fetch('/api/status', { method: 'POST' });
      if (!res.ok) throw new Error('status refresh failed');
      renderPanel(await res.json());
    } catch (err) {
      captureStatus.textContent = 'Unable to refresh status';
    }
  });

  function fieldInput(name, value) {
    const wrap = document.createElement('label');
    wrap.className = 'field';
    const span = document.createElement('span');
    span.textContent = name;
    wrap.appendChild(span);
    const input = document.createElement('input');
    input.name = name;
    if (typeof value === 'boolean') {
      input.type = 'checkbox';
      input.checked = value;
    } else {
      input.type = typeof value === 'number' ? 'number' : 'text';
      input.value = value;
    }
    wrap.appendChild(input);
    return wrap;
  }

  async function fetchConfig() {
    if (!configFields) return;
    try {
      const res = await fetch('/api/config');
      if (!res.ok) throw new Error('config fetch failed');
      const config = await res.json();
      if (config && config.error) {
        configStatus.textContent = config.message || 'Unable to load the configuration';
        return;
      }
      configFields.innerHTML = '';
      Object.entries(config).forEach(([section, values]) => {
        if (typeof values !== 'object' || values === null) {
          configFields.appendChild(fieldInput(section, values));
          return;
        }
        Object.entries(values).forEach(([key, value]) => {
          configFields.appendChild(fieldInput(`${section}.${key}`, value));
        });
      });
    } catch (err) {
      configStatus.textContent = 'Unable to load the configuration';
    }
  }

  configForm?.addEventListener('submit', async (event) => {
    event.preventDefault();
    const body = new URLSearchParams();
    configForm.querySelectorAll('input[name]').forEach((input) => {
      if (input.type === 'checkbox') {
        body.append(input.name, input.checked ? 'on' : 'off');
      } else {
        body.append(input.name, input.value);
      }
    });
    try {
      const res = await fetch('/api/config', {
        method: 'POST',
        headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
        body: body.toString(),
      });
      if (!res.ok) throw new Error('config submit failed');
      renderPanel(await res.json());
    } catch (err) {
      configStatus.textContent = 'Unable to submit the configuration';
    }
  });

  fetchPanel();
  fetchConfig();
  setInterval(fetchPanel, 2000);
})();
"#;

    rsx! {
        div { class: "page",
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            div { class: "shell",
                div { class: "header",
                    h1 { class: "title", "Angel Capture" }
                    p { class: "subtitle", "Control panel for the capture service" }
                    div { class: "tag", "Capture server: {props.angel_base_url}" }
                }
                div { class: "content",
                    div { id: "capture-card", class: "card",
                        h2 { class: "card-title", "Capture" }
                        p { class: "muted", "Start, stop or restart the capture process. Outcomes show up as banners below." }
                        div { class: "card-body",
                            div { id: "alerts", class: "alerts" }
                            div { class: "btn-row",
                                button { id: "startButton", class: "control-btn start", "data-action": "start", "Start" }
                                button { id: "stopButton", class: "control-btn stop", "data-action": "stop", "Stop" }
                                button { id: "restartButton", class: "control-btn restart", "data-action": "restart", "Restart" }
                            }
                            div { class: "btn-row",
                                button { id: "refreshButton", class: "pill-btn", "Refresh status" }
                            }
                            div { id: "capture-status", class: "status" }
                            div { id: "feature-flags", class: "caption" }
                        }
                    }
                    div { id: "config-card", class: "card",
                        h2 { class: "card-title", "Configuration" }
                        p { class: "muted", "Current capture configuration as reported by the server." }
                        div { class: "card-body",
                            form { id: "configForm",
                                div { id: "config-fields", class: "form-grid" }
                                button { id: "saveConfigButton", class: "primary", r#type: "submit", "Save configuration" }
                            }
                            div { id: "config-status", class: "status" }
                        }
                    }
                }
            }
        }
        style { "{styles}" }
        script { "{script}" }
    }
}
