// Bilingual (Italian / German) credential email.

pub const SUBJECT: &str = "Accesso account studente / Schulerkonto-Zugang";

pub const SCHOOL_LOGO_URL: &str = "https://i.imgur.com/0QV6BIW.png";

const TEMPLATE: &str = r#"
<html>
<head>
<meta charset="UTF-8">
<style>
    body { font-family: Segoe UI, Arial, sans-serif; font-size: 14px; color: #333; }
    .section { margin-bottom: 20px; }
    .lang-title { font-weight: bold; font-size: 16px; margin-bottom: 5px; }
    .credentials { background-color: #f2f2f2; padding: 10px; border-radius: 5px; }
    .credentials p { margin: 5px 0; font-weight: bold; }
    a { color: #2a72de; text-decoration: none; }
</style>
</head>
<body>

<div style="text-align: center; padding: 20px 0;">
    <img src="{{logo_url}}" alt="School Logo" style="max-height: 100px;">
</div>

<div class="section">
    <div class="lang-title">Benvenuto/a!</div>
    <p>La nostra scuola utilizza <b>Microsoft Teams</b>, <b>Microsoft Outlook</b> e <b>Office 365</b> come piattaforma principale di apprendimento e organizzazione.</p>
    <p>Offriamo agli studenti, al personale scolastico e alle famiglie l'opportunità di installare gratuitamente Office su un massimo di 4 dispositivi.</p>
    <p>Le applicazioni Office sono sempre accessibili tramite browser.</p>
    <p>Qui di seguito ti mandiamo i tuoi dati di accesso personali. Ti verrà richiesto di cambiare la password.</p>
</div>

<div class="section">
    <div class="lang-title">Willkommen!</div>
    <p>Unsere Schule verwendet <b>Microsoft Teams</b>, <b>Microsoft Outlook</b> und <b>Office 365</b>.</p>
    <p>Schüler und Familien können Office kostenlos auf bis zu 4 Geräten installieren.</p>
    <p>Office ist auch im Browser nutzbar.</p>
    <p>Deine persönlichen Zugangsdaten findest du unten. Das Passwort muss beim ersten Login geändert werden.</p>
</div>

<div class="section credentials">
    <p><b>Username &amp; E-Mail:</b> {{user_principal_name}}</p>
    <p><b>Temporary Password:</b> {{password}}</p>
</div>

<div class="section">
    <p><b>Primo accesso / Erste Anmeldung:</b> <a href="https://www.office.com">https://www.office.com</a></p>
    <p><b>Teams App:</b> <a href="https://www.microsoft.com/it-it/microsoft-teams/download-app">Download</a></p>
</div>

</body>
</html>
"#;

/// Minimal HTML escaping for interpolated text.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the HTML body carrying the student's username and temporary password.
pub fn render_credentials(user_principal_name: &str, password: &str) -> String {
    TEMPLATE
        .replace("{{logo_url}}", SCHOOL_LOGO_URL)
        .replace("{{user_principal_name}}", &escape(user_principal_name))
        .replace("{{password}}", &escape(password))
}
