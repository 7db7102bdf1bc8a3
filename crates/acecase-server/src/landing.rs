//! Server-rendered landing page via `minijinja`.
//!
//! The page lists the case catalog and carries the real-time server URL
//! and the sign-up popup timing for the browser script.

use acecase_types::Case;
use minijinja::Environment;
use serde::Serialize;

/// Template name registered in the environment.
const LANDING: &str = "landing.html";

const LANDING_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Ace Case</title>
    <style>
        body { background: #0d1117; color: #c9d1d9; font-family: system-ui, sans-serif; padding: 2rem; max-width: 800px; margin: 0 auto; }
        h1 { color: #58a6ff; margin-bottom: 0.25rem; }
        .subtitle { color: #8b949e; margin-top: 0; }
        .case { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem 1.5rem; margin: 0.5rem 0; cursor: pointer; }
        .case .industry { color: #8b949e; font-size: 0.85rem; }
        #signup { display: none; background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; margin-top: 1.5rem; }
    </style>
</head>
<body>
    <h1>Ace Case</h1>
    <p class="subtitle">Practice consulting case interviews with a live AI interviewer.</p>

    <ul id="cases" data-livekit-url="{{ livekit_url }}">
    {%- for case in cases %}
        <li class="case" data-case-id="{{ case.caseId }}">
            <div class="industry">{{ case.industry }}</div>
            <div class="label">{{ case.label }}</div>
        </li>
    {%- endfor %}
    </ul>

    <form id="signup" data-popup-delay-ms="{{ popup_delay_ms }}" data-success-close-ms="{{ success_close_ms }}">
        <p>Join the waitlist for new cases.</p>
        <input type="email" name="email" placeholder="Email" required>
        <input type="email" name="confirm_email" placeholder="Confirm email" required>
        <button type="submit">Subscribe</button>
        <p class="status"></p>
    </form>

    <script>
    (function () {
        var form = document.getElementById("signup");
        var status = form.querySelector(".status");
        var key = "acecase_subscribed";
        if (!localStorage.getItem(key)) {
            setTimeout(function () { form.style.display = "block"; },
                Number(form.dataset.popupDelayMs));
        }
        form.addEventListener("submit", function (e) {
            e.preventDefault();
            if (form.email.value !== form.confirm_email.value) {
                status.textContent = "Emails do not match";
                return;
            }
            fetch("/api/subscribe", {
                method: "POST",
                headers: { "Content-Type": "application/json" },
                body: JSON.stringify({ email: form.email.value })
            }).then(function (r) {
                if (!r.ok) { throw new Error("subscribe failed"); }
                localStorage.setItem(key, "true");
                status.textContent = "Thanks! You're on the list.";
                setTimeout(function () { form.style.display = "none"; },
                    Number(form.dataset.successCloseMs));
            }).catch(function () {
                status.textContent = "Something went wrong. Try again.";
            });
        });
        document.querySelectorAll(".case").forEach(function (el) {
            el.addEventListener("click", function () {
                fetch("/api/token", {
                    method: "POST",
                    body: JSON.stringify({ caseId: el.dataset.caseId })
                }).then(function (r) { return r.json(); })
                  .then(function (body) {
                      if (body.token) {
                          sessionStorage.setItem("acecase_token", body.token);
                          sessionStorage.setItem("acecase_livekit_url",
                              document.getElementById("cases").dataset.livekitUrl);
                      }
                  });
            });
        });
    })();
    </script>
</body>
</html>
"#;

/// Values the landing template reads.
#[derive(Debug, Serialize)]
pub struct LandingContext<'a> {
    /// Cases to list.
    pub cases: &'a [Case],
    /// Real-time server URL the client connects to.
    pub livekit_url: &'a str,
    /// Popup delay in milliseconds.
    pub popup_delay_ms: u64,
    /// Success message lifetime in milliseconds.
    pub success_close_ms: u64,
}

/// Compiled landing page template.
#[derive(Debug)]
pub struct LandingPage {
    env: Environment<'static>,
}

impl LandingPage {
    /// Compile the built-in template.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template_owned(LANDING, LANDING_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the page for the given context.
    pub fn render(&self, ctx: &LandingContext<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template(LANDING)?.render(ctx)
    }
}
