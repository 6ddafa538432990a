use crate::emotions::EmotionCatalog;
use crate::models::{DashboardData, EmotionEntry, HistoryData};

pub fn render_dashboard(catalog: &EmotionCatalog, data: &DashboardData) -> String {
    let palette: String = catalog
        .iter()
        .map(|info| {
            let count = data.month_counts.get(&info.emotion).copied().unwrap_or(0);
            format!(
                r#"<div class="palette-item" style="--tone: {color}">
          <span class="icon">{icon}</span>
          <span class="name">{name}</span>
          <span class="count">{count}</span>
        </div>"#,
                color = info.color,
                icon = info.icon,
                name = info.name,
            )
        })
        .collect();

    let recent = if data.recent_entries.is_empty() {
        r#"<p class="empty">No entries yet. <a href="/record">Record how you feel today.</a></p>"#
            .to_string()
    } else {
        data.recent_entries
            .iter()
            .map(|entry| entry_card(catalog, entry, false))
            .collect()
    };

    let body = format!(
        r#"<header>
      <h1>Emoiro</h1>
      <p class="subtitle">Today is <strong>{today}</strong>.</p>
      <a class="btn" href="/record">Record today's emotion</a>
    </header>
    <section>
      <h2>This month's palette <span class="muted">{month}</span></h2>
      <div class="palette">{palette}</div>
    </section>
    <section>
      <h2>Recent entries</h2>
      <div class="entries">{recent}</div>
    </section>"#,
        today = escape_html(&data.today),
        month = escape_html(&data.month),
    );

    page("Emoiro", "home", &body, DASHBOARD_SCRIPT)
}

pub fn render_record(catalog: &EmotionCatalog, today: &str, existing: Option<&EmotionEntry>) -> String {
    let options: String = catalog
        .iter()
        .map(|info| {
            let checked = existing.is_some_and(|entry| entry.emotion_type == info.emotion);
            format!(
                r#"<label class="emotion-option" style="--tone: {color}">
          <input type="radio" name="emotion_type" value="{code}"{checked} required />
          <span class="emotion-label"><span class="icon">{icon}</span>{name}</span>
        </label>"#,
                color = info.color,
                code = info.emotion.code(),
                checked = if checked { " checked" } else { "" },
                icon = info.icon,
                name = info.name,
            )
        })
        .collect();

    let note = existing
        .and_then(|entry| entry.note.as_deref())
        .map(escape_html)
        .unwrap_or_default();
    let heading = if existing.is_some() {
        "Update today's emotion"
    } else {
        "How do you feel today?"
    };

    let body = format!(
        r#"<header>
      <h1>{heading}</h1>
      <p class="subtitle">One emotion per day. Recording again replaces the entry.</p>
    </header>
    <form class="record-form" method="post" action="/record">
      <label class="field">Date
        <input type="date" name="date" value="{today}" required />
      </label>
      <div class="emotion-grid">{options}</div>
      <label class="field">Note
        <textarea id="note" name="note" rows="4" placeholder="What happened today?">{note}</textarea>
      </label>
      <button class="btn" type="submit">Save</button>
    </form>"#,
        today = escape_html(today),
    );

    page("Record - Emoiro", "record", &body, RECORD_SCRIPT)
}

pub fn render_history(catalog: &EmotionCatalog, data: &HistoryData) -> String {
    let months = if data.monthly_stats.is_empty() {
        r#"<p class="empty">No entries in the last six months.</p>"#.to_string()
    } else {
        data.monthly_stats
            .iter()
            .map(|month| {
                let total: u32 = month.stats.values().sum();
                let bars: String = catalog
                    .iter()
                    .filter_map(|info| {
                        let count = *month.stats.get(&info.emotion)?;
                        Some(format!(
                            r#"<span class="bar" style="flex: {count}; background: {color}" title="{name}: {count}">{icon}</span>"#,
                            color = info.color,
                            name = info.name,
                            icon = info.icon,
                        ))
                    })
                    .collect();
                format!(
                    r#"<div class="stats-card">
          <div class="stats-head"><span>{month}</span><span class="muted">{total} days</span></div>
          <div class="bars">{bars}</div>
        </div>"#,
                    month = escape_html(&month.month),
                )
            })
            .collect()
    };

    let timeline = if data.entries.is_empty() {
        r#"<p class="empty">Nothing recorded yet.</p>"#.to_string()
    } else {
        data.entries
            .iter()
            .map(|entry| entry_card(catalog, entry, true))
            .collect()
    };

    let body = format!(
        r#"<header>
      <h1>History</h1>
      <p class="subtitle">Every day you have recorded, newest first.</p>
    </header>
    <section>
      <div class="calendar-head">
        <button class="tab" type="button" id="cal-prev">&larr;</button>
        <h2 id="cal-title"></h2>
        <button class="tab" type="button" id="cal-next">&rarr;</button>
      </div>
      <div class="calendar" id="calendar"></div>
    </section>
    <section>
      <h2>Monthly palette</h2>
      <div class="months">{months}</div>
    </section>
    <section>
      <h2>Timeline</h2>
      <div class="entries">{timeline}</div>
    </section>"#,
    );

    page("History - Emoiro", "history", &body, HISTORY_SCRIPT)
}

fn entry_card(catalog: &EmotionCatalog, entry: &EmotionEntry, deletable: bool) -> String {
    let info = catalog.info(entry.emotion_type);
    let note = entry
        .note
        .as_deref()
        .map(|note| format!(r#"<p class="note">{}</p>"#, escape_html(note)))
        .unwrap_or_default();
    let date = escape_html(&entry.date);
    let delete = if deletable {
        format!(r#"<a class="delete" href="/delete/{date}">Delete</a>"#)
    } else {
        String::new()
    };

    format!(
        r#"<article class="entry-card timeline-item" style="--tone: {color}">
          <span class="icon">{icon}</span>
          <div class="entry-body">
            <div class="entry-head"><span class="date">{date}</span><span class="name">{name}</span>{delete}</div>
            {note}
          </div>
        </article>"#,
        color = info.color,
        icon = info.icon,
        name = info.name,
    )
}

fn page(title: &str, active: &str, body: &str, script: &str) -> String {
    let nav: String = [("home", "/", "Home"), ("record", "/record", "Record"), ("history", "/history", "History")]
        .into_iter()
        .map(|(key, href, label)| {
            let class = if key == active { "tab active" } else { "tab" };
            format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
        })
        .collect();

    // Body goes in last so user text can never be mistaken for a placeholder.
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{NAV}}", &nav)
        .replace("{{PAGE_SCRIPT}}", script)
        .replace("{{BODY}}", body)
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #6c63ff;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    nav {
      display: flex;
      gap: 6px;
      padding: 6px;
      margin-bottom: 18px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
      align-items: flex-start;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    a {
      color: var(--accent-2);
    }

    .subtitle, .muted {
      margin: 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      box-shadow: 0 10px 24px rgba(108, 99, 255, 0.3);
      position: relative;
      overflow: hidden;
    }

    .tab {
      border: none;
      background: transparent;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      font-weight: 600;
      color: #6b645d;
      text-decoration: none;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .palette {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(100px, 1fr));
      gap: 12px;
    }

    .palette-item {
      background: white;
      border-radius: 18px;
      padding: 14px;
      border-top: 6px solid var(--tone);
      display: grid;
      justify-items: center;
      gap: 4px;
    }

    .palette-item .icon {
      font-size: 1.8rem;
    }

    .palette-item .count {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .entries, .months {
      display: grid;
      gap: 12px;
    }

    .entry-card {
      background: white;
      border-radius: 18px;
      padding: 14px 18px;
      border-left: 6px solid var(--tone);
      display: flex;
      gap: 14px;
      align-items: flex-start;
      transition: transform 150ms ease;
    }

    .entry-card .icon {
      font-size: 1.6rem;
    }

    .entry-body {
      flex: 1;
    }

    .entry-head {
      display: flex;
      gap: 12px;
      align-items: baseline;
    }

    .entry-head .date {
      font-weight: 600;
    }

    .entry-head .delete {
      margin-left: auto;
      font-size: 0.85rem;
      color: #b0413e;
    }

    .note {
      margin: 6px 0 0;
      white-space: pre-wrap;
      color: #4a4743;
    }

    .record-form {
      display: grid;
      gap: 18px;
    }

    .field {
      display: grid;
      gap: 6px;
      font-weight: 600;
    }

    .field input, .field textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .emotion-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(110px, 1fr));
      gap: 10px;
    }

    .emotion-option input {
      position: absolute;
      opacity: 0;
    }

    .emotion-label {
      display: grid;
      justify-items: center;
      gap: 4px;
      padding: 14px 8px;
      border-radius: 16px;
      background: white;
      border: 2px solid transparent;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    .emotion-label .icon {
      font-size: 1.8rem;
    }

    .emotion-option input:checked + .emotion-label {
      border-color: var(--tone);
      transform: scale(1.05);
    }

    .stats-card {
      background: white;
      border-radius: 18px;
      padding: 14px 18px;
      display: grid;
      gap: 10px;
    }

    .stats-head {
      display: flex;
      justify-content: space-between;
      font-weight: 600;
    }

    .bars {
      display: flex;
      height: 28px;
      border-radius: 999px;
      overflow: hidden;
    }

    .bar {
      display: grid;
      place-items: center;
      font-size: 0.9rem;
    }

    .calendar-head {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .calendar-head h2 {
      margin: 0;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
      margin-top: 12px;
    }

    .calendar .weekday {
      text-align: center;
      font-size: 0.8rem;
      color: #8b857d;
    }

    .calendar .day {
      aspect-ratio: 1;
      border-radius: 12px;
      background: white;
      display: grid;
      place-items: center;
      font-size: 0.9rem;
    }

    .calendar .day.filled {
      color: white;
      font-weight: 600;
    }

    .empty {
      color: #8b857d;
    }

    .ripple {
      position: absolute;
      border-radius: 50%;
      background: rgba(255, 255, 255, 0.6);
      transform: scale(0);
      animation: ripple 600ms linear;
      pointer-events: none;
    }

    .toast {
      position: fixed;
      top: 20px;
      right: 20px;
      max-width: 300px;
      padding: 14px 20px;
      border-radius: 12px;
      color: white;
      box-shadow: 0 10px 25px rgba(0, 0, 0, 0.15);
      transform: translateX(400px);
      transition: transform 300ms ease;
      z-index: 1000;
    }

    .toast.show {
      transform: translateX(0);
    }

    .toast-info {
      background: #6c63ff;
    }

    .toast-success {
      background: #4ecdc4;
    }

    @keyframes ripple {
      to {
        transform: scale(4);
        opacity: 0;
      }
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(12px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 24px;
      }

      .toast {
        left: 10px;
        right: 10px;
        max-width: none;
      }
    }
  </style>
</head>
<body>
  <nav>{{NAV}}</nav>
  <main class="app">
    {{BODY}}
  </main>

  <script>
    const showToast = (message, type = 'info', duration = 3000) => {
      const toast = document.createElement('div');
      toast.className = `toast toast-${type}`;
      toast.textContent = message;
      document.body.appendChild(toast);
      setTimeout(() => toast.classList.add('show'), 100);
      setTimeout(() => {
        toast.classList.remove('show');
        setTimeout(() => toast.remove(), 300);
      }, duration);
    };

    const pick = (items) => items[Math.floor(Math.random() * items.length)];

    document.querySelectorAll('.btn').forEach((button) => {
      button.addEventListener('click', (event) => {
        const rect = button.getBoundingClientRect();
        const size = Math.max(rect.width, rect.height);
        const ripple = document.createElement('span');
        ripple.className = 'ripple';
        ripple.style.width = ripple.style.height = `${size}px`;
        ripple.style.left = `${event.clientX - rect.left - size / 2}px`;
        ripple.style.top = `${event.clientY - rect.top - size / 2}px`;
        button.appendChild(ripple);
        setTimeout(() => ripple.remove(), 600);
      });
    });

    document.querySelectorAll('a[href^="/delete/"]').forEach((link) => {
      link.addEventListener('click', (event) => {
        if (!confirm('Delete this entry?')) {
          event.preventDefault();
        }
      });
    });

    document.addEventListener('keydown', (event) => {
      const tag = event.target.tagName;
      if ((event.ctrlKey || event.metaKey) && event.key === 'n') {
        event.preventDefault();
        window.location.href = '/record';
      } else if ((event.ctrlKey || event.metaKey) && event.key === 'h') {
        event.preventDefault();
        window.location.href = '/history';
      } else if (event.key === 'Escape' && tag !== 'TEXTAREA' && tag !== 'INPUT') {
        window.location.href = '/';
      }
    });

{{PAGE_SCRIPT}}
  </script>
</body>
</html>
"#;

const DASHBOARD_SCRIPT: &str = r#"
    const motivations = [
      'Nice work showing up for yourself today.',
      'Recording your feelings keeps your mind healthy.',
      'Small changes are growth too.',
      'Your emotions are painting a beautiful palette.',
      'Every entry supports the future you.'
    ];

    document.querySelectorAll('.entry-card').forEach((card, index) => {
      card.style.opacity = '0';
      setTimeout(() => {
        card.style.transition = 'opacity 300ms ease';
        card.style.opacity = '1';
      }, index * 100);
    });

    setTimeout(() => showToast(pick(motivations), 'info', 5000), 3000);
"#;

const RECORD_SCRIPT: &str = r#"
    const feedback = {
      joy: ['What a wonderful day!', 'Hold on to that smile.'],
      anger: ['Writing it down lightens the load.', 'Take a deep breath and let it settle.'],
      sadness: ['Hard days pass. Tomorrow can be better.', 'Your feelings matter.'],
      calm: ['A calm mind is a lovely thing.', 'Enjoy the quiet moments.'],
      excitement: ['Capture that energy!', 'What an energetic day.'],
      anxiety: ['Anxiety is a valid feeling too.', 'Try breathing slowly for a moment.'],
      love: ['A heart full of love, beautiful.', 'Cherish that warmth.']
    };

    document.querySelectorAll('.emotion-option input').forEach((input) => {
      input.addEventListener('change', () => {
        showToast(pick(feedback[input.value] || ['Thank you for recording your feelings.']), 'success');
      });
    });

    const note = document.getElementById('note');
    const resize = () => {
      note.style.height = 'auto';
      note.style.height = `${note.scrollHeight}px`;
    };
    note.addEventListener('input', resize);

    document.querySelector('.record-form').addEventListener('submit', (event) => {
      const button = event.target.querySelector('button[type="submit"]');
      button.textContent = 'Saving...';
      button.disabled = true;
    });
"#;

const HISTORY_SCRIPT: &str = r#"
    const calendarEl = document.getElementById('calendar');
    const titleEl = document.getElementById('cal-title');
    const weekdays = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];
    let calendarData = {};
    let cursor = new Date();
    cursor.setDate(1);

    const pad = (value) => String(value).padStart(2, '0');

    const renderCalendar = () => {
      const year = cursor.getFullYear();
      const month = cursor.getMonth();
      const firstWeekday = new Date(year, month, 1).getDay();
      const days = new Date(year, month + 1, 0).getDate();

      titleEl.textContent = `${year}-${pad(month + 1)}`;
      let html = weekdays.map((day) => `<div class="weekday">${day}</div>`).join('');
      for (let i = 0; i < firstWeekday; i += 1) {
        html += '<div></div>';
      }
      for (let day = 1; day <= days; day += 1) {
        const key = `${year}-${pad(month + 1)}-${pad(day)}`;
        const cell = calendarData[key];
        if (cell) {
          html += `<div class="day filled" style="background: ${cell.color}" title="${cell.emotion}">${day}</div>`;
        } else {
          html += `<div class="day">${day}</div>`;
        }
      }
      calendarEl.innerHTML = html;
    };

    document.getElementById('cal-prev').addEventListener('click', () => {
      cursor.setMonth(cursor.getMonth() - 1);
      renderCalendar();
    });

    document.getElementById('cal-next').addEventListener('click', () => {
      cursor.setMonth(cursor.getMonth() + 1);
      renderCalendar();
    });

    const observer = new IntersectionObserver((entries) => {
      entries.forEach((entry) => {
        if (entry.isIntersecting) {
          entry.target.style.opacity = '1';
          entry.target.style.transform = 'translateX(0)';
        }
      });
    }, { threshold: 0.1 });

    document.querySelectorAll('.timeline-item').forEach((item) => {
      item.style.opacity = '0';
      item.style.transform = 'translateX(-20px)';
      item.style.transition = 'all 0.6s ease-out';
      observer.observe(item);
    });

    renderCalendar();
    fetch('/api/calendar-data')
      .then((res) => res.json())
      .then((data) => {
        calendarData = data;
        renderCalendar();
      })
      .catch(() => showToast('Unable to load calendar data', 'info'));
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotions::Emotion;
    use crate::models::MonthlyStats;
    use chrono::NaiveDate;

    fn entry(date: &str, emotion: Emotion, note: Option<&str>) -> EmotionEntry {
        EmotionEntry {
            id: 1,
            date: date.to_string(),
            emotion_type: emotion,
            note: note.map(str::to_string),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn record_prefills_existing_entry() {
        let catalog = EmotionCatalog::new();
        let existing = entry("2024-01-05", Emotion::Anxiety, Some("busy <day>"));
        let html = render_record(&catalog, "2024-01-05", Some(&existing));

        assert!(html.contains(r#"value="anxiety" checked"#));
        assert!(!html.contains(r#"value="joy" checked"#));
        assert!(html.contains("busy &lt;day&gt;</textarea>"));
        assert!(html.contains(r#"value="2024-01-05""#));
    }

    #[test]
    fn record_without_entry_has_nothing_checked() {
        let catalog = EmotionCatalog::new();
        let html = render_record(&catalog, "2024-01-05", None);
        assert!(!html.contains(" checked"));
        assert_eq!(html.matches(r#"name="emotion_type""#).count(), 7);
    }

    #[test]
    fn dashboard_shows_palette_and_recent_entries() {
        let catalog = EmotionCatalog::new();
        let data = DashboardData {
            today: "2024-03-12".to_string(),
            recent_entries: vec![entry("2024-03-10", Emotion::Joy, Some("{{BODY}}"))],
            month: "2024-03".to_string(),
            month_counts: [(Emotion::Joy, 1)].into_iter().collect(),
        };
        let html = render_dashboard(&catalog, &data);

        assert_eq!(html.matches("palette-item").count(), 7);
        assert!(html.contains("2024-03-10"));
        assert!(html.contains("喜び"));
        assert!(html.contains("{{BODY}}"));
        assert!(!html.contains(r#"href="/delete/"#));
        assert!(!html.contains(r#"class="delete""#));
    }

    #[test]
    fn history_links_delete_and_lists_months() {
        let catalog = EmotionCatalog::new();
        let data = HistoryData {
            entries: vec![entry("2024-06-03", Emotion::Sadness, None)],
            monthly_stats: vec![MonthlyStats {
                month: "2024-06".to_string(),
                stats: [(Emotion::Sadness, 1)].into_iter().collect(),
            }],
        };
        let html = render_history(&catalog, &data);

        assert!(html.contains(r#"href="/delete/2024-06-03""#));
        assert!(html.contains("2024-06"));
        assert!(html.contains("#4A90E2"));
        assert!(html.contains("/api/calendar-data"));
    }
}
