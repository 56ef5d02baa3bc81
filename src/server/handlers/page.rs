//! The editing page served at `/`.
//!
//! A single self-contained HTML document: the form posts the composition to
//! `/api/classified/render` on every input event and shows the returned
//! data URL, dropping responses to superseded requests. Export buttons stay
//! disabled until a render succeeds.

use axum::response::Html;

/// GET / - return the editor page.
pub async fn index() -> Html<&'static str> {
    Html(EDITOR_PAGE)
}

const EDITOR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Classified Card</title>
    <style>
        body { font-family: sans-serif; margin: 0; padding: 20px; background: #f4f4f4; }
        .layout { display: flex; gap: 24px; flex-wrap: wrap; }
        form { background: #fff; padding: 16px; border-radius: 6px; width: 340px; }
        label { display: block; margin-top: 10px; font-size: 14px; }
        input[type=text], textarea, select { width: 100%; box-sizing: border-box; }
        .preview img { max-width: 680px; width: 100%; border: 1px solid #ccc; background: #fff; }
        button { margin-top: 12px; margin-right: 8px; }
    </style>
</head>
<body>
<div class="layout">
    <form id="card">
        <label>Template
            <select name="template">
                <option value="">Choose...</option>
                <option value="1">Classic</option>
                <option value="2">Sunrise</option>
                <option value="3">Ocean</option>
                <option value="4">Festive</option>
            </select>
        </label>
        <label>Title <input type="text" name="title"></label>
        <label>Body <textarea name="body" rows="4"></textarea></label>
        <label>Phone numbers <textarea name="phones" rows="3"></textarea></label>
        <label><input type="radio" name="phone_layout" value="vertical" checked> Vertical</label>
        <label><input type="radio" name="phone_layout" value="horizontal"> Horizontal</label>
        <label><input type="checkbox" name="watermark"> Preview watermark</label>
        <label>Title size <input type="range" name="title_size" min="30" max="80" value="56"></label>
        <label>Body size <input type="range" name="body_size" min="16" max="60" value="36"></label>
        <label>Phone size <input type="range" name="phone_size" min="20" max="70" value="40"></label>
        <label>Title to body <input type="range" name="title_body_spacing" min="0" max="80" value="10"></label>
        <label>Body to phone <input type="range" name="body_phone_spacing" min="0" max="80" value="30"></label>
        <button type="button" id="png" disabled>Download PNG</button>
        <button type="button" id="pdf" disabled>Download PDF</button>
    </form>
    <div class="preview"><img id="preview" alt=""></div>
</div>
<script>
const form = document.getElementById('card');

function composition() {
    const f = new FormData(form);
    const num = (k) => Number(f.get(k));
    return {
        template: f.get('template') ? Number(f.get('template')) : null,
        title: f.get('title'),
        body: f.get('body'),
        phones: f.get('phones'),
        phone_layout: f.get('phone_layout'),
        watermark: f.get('watermark') === 'on',
        style: {
            title_size: num('title_size'),
            body_size: num('body_size'),
            phone_size: num('phone_size'),
            title_body_spacing: num('title_body_spacing'),
            body_phone_spacing: num('body_phone_spacing'),
        },
    };
}

// Responses can arrive out of order; only the newest request may paint
let latestRender = 0;

async function repaint() {
    const seq = ++latestRender;
    const res = await fetch('/api/classified/render', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(composition()),
    });
    const json = await res.json();
    if (seq !== latestRender) return;
    const artifact = json.artifact;
    document.getElementById('preview').src = artifact ? artifact.data_url : '';
    document.getElementById('png').disabled = !artifact;
    document.getElementById('pdf').disabled = !artifact;
}

async function download(kind) {
    const res = await fetch('/api/classified/export/' + kind, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(composition()),
    });
    if (!res.ok) return;
    const name = (res.headers.get('Content-Disposition') || '').match(/filename="(.+)"/);
    const a = document.createElement('a');
    a.href = URL.createObjectURL(await res.blob());
    a.download = name ? name[1] : 'classified.' + kind;
    a.click();
    URL.revokeObjectURL(a.href);
}

form.addEventListener('input', repaint);
document.getElementById('png').addEventListener('click', () => download('png'));
document.getElementById('pdf').addEventListener('click', () => download('pdf'));
</script>
</body>
</html>"#;
