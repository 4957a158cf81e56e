use crate::models::ProgressResponse;

pub fn render_index(view: &ProgressResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &view.date)
        .replace("{{TODAY}}", &view.today.to_string())
        .replace("{{TOTAL}}", &view.total.to_string())
        .replace("{{STREAK}}", &view.streak.to_string())
        .replace("{{BADGE}}", &view.badge)
        .replace("{{PERCENT}}", &format!("{:.1}", view.percent))
        .replace("{{TARGET}}", &view.target.to_string())
        .replace("{{WEEKLY}}", &view.weekly.to_string())
        .replace("{{WEEKLY_GOAL}}", &view.weekly_goal.to_string())
        .replace("{{MONTHLY}}", &view.monthly.to_string())
        .replace("{{MONTHLY_GOAL}}", &view.monthly_goal.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Grindtrack</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=IBM+Plex+Sans:wght@400;500;600&family=IBM+Plex+Mono:wght@500&display=swap');

    :root {
      --bg: #0e1117;
      --panel: #161b24;
      --panel-2: #1c2330;
      --ink: #e8eaf0;
      --muted: #8b93a7;
      --accent: #3fb68b;
      --accent-2: #e8a33d;
      --danger: #d96a5b;
      --line: rgba(139, 147, 167, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: 'IBM Plex Sans', 'Segoe UI', sans-serif;
      display: flex;
      justify-content: center;
      padding: 36px 16px 56px;
    }

    .app {
      width: min(900px, 100%);
      display: grid;
      gap: 22px;
    }

    header h1 {
      margin: 0;
      font-size: 1.9rem;
      font-weight: 600;
    }

    header .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    section.card {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 20px;
      display: grid;
      gap: 16px;
    }

    .tiles {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .tile {
      background: var(--panel-2);
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 14px;
    }

    .tile .label {
      display: block;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .tile .value {
      display: block;
      margin-top: 6px;
      font-family: 'IBM Plex Mono', monospace;
      font-size: 1.5rem;
      color: var(--ink);
    }

    .tile .value.streak {
      color: var(--accent-2);
    }

    .goal {
      display: grid;
      gap: 6px;
    }

    .goal .row {
      display: flex;
      justify-content: space-between;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .goal .row .figure {
      font-family: 'IBM Plex Mono', monospace;
      color: var(--ink);
    }

    .bar {
      height: 8px;
      border-radius: 4px;
      background: var(--panel-2);
      overflow: hidden;
    }

    .bar .fill {
      height: 100%;
      border-radius: 4px;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .bar .fill.alt {
      background: var(--accent-2);
    }

    form.entry {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    input[type='number'] {
      background: var(--panel-2);
      border: 1px solid var(--line);
      border-radius: 8px;
      color: var(--ink);
      padding: 10px 12px;
      width: 130px;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 8px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: #08110d;
    }

    button.secondary,
    a.button-link {
      background: var(--panel-2);
      color: var(--ink);
      border: 1px solid var(--line);
    }

    a.button-link {
      border-radius: 8px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      text-decoration: none;
      display: inline-flex;
      align-items: center;
    }

    button:active {
      transform: translateY(1px);
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .chart-header h2 {
      margin: 0;
      font-size: 1.15rem;
    }

    .tabs {
      display: flex;
      gap: 4px;
      padding: 4px;
      background: var(--panel-2);
      border-radius: 8px;
    }

    .tab {
      background: transparent;
      color: var(--muted);
      font-weight: 500;
      padding: 6px 12px;
    }

    .tab.active {
      background: var(--panel);
      color: var(--ink);
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    #chart text {
      font-family: 'IBM Plex Sans', sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-line.soft {
      stroke: var(--accent-2);
      stroke-width: 1.5;
      stroke-dasharray: 3 4;
    }

    .chart-bar {
      fill: var(--accent);
      opacity: 0.85;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-milestone {
      stroke: var(--accent-2);
      stroke-dasharray: 5 5;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 10px;
    }

    .breakdown {
      display: grid;
      gap: 10px;
    }

    .breakdown .goal .row .figure {
      font-size: 0.85rem;
    }

    ul.missed {
      margin: 0;
      padding: 0;
      list-style: none;
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    ul.missed li {
      background: var(--panel-2);
      border: 1px solid var(--line);
      border-radius: 6px;
      padding: 5px 10px;
      font-family: 'IBM Plex Mono', monospace;
      font-size: 0.85rem;
      color: var(--danger);
    }

    ul.missed li.clear {
      color: var(--accent);
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .status[data-type='error'] {
      color: var(--danger);
    }

    .status[data-type='ok'] {
      color: var(--accent);
    }

    @media (max-width: 620px) {
      button {
        flex: 1;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Grindtrack</h1>
      <p class="subtitle">Daily coding-practice submissions, streaks and goals.</p>
    </header>

    <section class="card">
      <div class="tiles">
        <div class="tile">
          <span class="label">Date</span>
          <span id="date" class="value">{{DATE}}</span>
        </div>
        <div class="tile">
          <span class="label">Today</span>
          <span id="today" class="value">{{TODAY}}</span>
        </div>
        <div class="tile">
          <span class="label">All time</span>
          <span id="total" class="value">{{TOTAL}}</span>
        </div>
        <div class="tile">
          <span class="label">Streak</span>
          <span id="streak" class="value streak">{{STREAK}}</span>
        </div>
        <div class="tile">
          <span class="label">Badge</span>
          <span id="badge" class="value">{{BADGE}}</span>
        </div>
      </div>

      <div class="goal">
        <div class="row">
          <span>Target progress</span>
          <span class="figure"><span id="percent">{{PERCENT}}</span>% of {{TARGET}}</span>
        </div>
        <div class="bar"><div class="fill" id="target-bar"></div></div>
      </div>
      <div class="goal">
        <div class="row">
          <span>This week (Mon&ndash;Sun)</span>
          <span class="figure"><span id="weekly">{{WEEKLY}}</span> / {{WEEKLY_GOAL}}</span>
        </div>
        <div class="bar"><div class="fill alt" id="weekly-bar"></div></div>
      </div>
      <div class="goal">
        <div class="row">
          <span>This month</span>
          <span class="figure"><span id="monthly">{{MONTHLY}}</span> / {{MONTHLY_GOAL}}</span>
        </div>
        <div class="bar"><div class="fill alt" id="monthly-bar"></div></div>
      </div>
    </section>

    <section class="card">
      <form class="entry" id="entry-form" method="post" action="/submit">
        <label for="count">Submissions today</label>
        <input type="number" id="count" name="count" min="1" step="1" value="1" />
        <button type="submit">Add</button>
      </form>
      <div class="toolbar">
        <button class="secondary" id="sync-btn" type="button">Sync remote history</button>
        <a class="button-link" href="/api/export" download="submissions.csv">Download CSV</a>
      </div>
      <div class="breakdown" id="breakdown"></div>
      <div class="status" id="status"></div>
    </section>

    <section class="card">
      <div class="chart-header">
        <h2 id="chart-title">This month</h2>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-tab="month" role="tab" aria-selected="true">This month</button>
          <button class="tab" type="button" data-tab="history" role="tab" aria-selected="false">Daily + 7d avg</button>
          <button class="tab" type="button" data-tab="cumulative" role="tab" aria-selected="false">Cumulative</button>
        </div>
      </div>
      <svg id="chart" viewBox="0 0 640 280" aria-label="Submissions chart" role="img"></svg>
    </section>

    <section class="card">
      <h2 style="margin: 0; font-size: 1.15rem;">Missed days</h2>
      <ul class="missed" id="missed"></ul>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const chartTitleEl = document.getElementById('chart-title');
    const breakdownEl = document.getElementById('breakdown');
    const missedEl = document.getElementById('missed');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let statsData = null;
    let activeTab = 'month';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setBar = (id, value, goal) => {
      const width = goal > 0 ? Math.min((value / goal) * 100, 100) : 100;
      document.getElementById(id).style.width = `${width}%`;
    };

    const updateProgress = (data) => {
      document.getElementById('date').textContent = data.date;
      document.getElementById('today').textContent = data.today;
      document.getElementById('total').textContent = data.total;
      document.getElementById('streak').textContent = data.streak;
      document.getElementById('badge').textContent = data.badge;
      document.getElementById('percent').textContent = data.percent.toFixed(1);
      document.getElementById('weekly').textContent = data.weekly;
      document.getElementById('monthly').textContent = data.monthly;
      setBar('target-bar', data.percent, 100);
      setBar('weekly-bar', data.weekly, data.weekly_goal);
      setBar('monthly-bar', data.monthly, data.monthly_goal);
    };

    const chartFrame = (maxValue) => {
      const width = 640;
      const height = 280;
      const padX = 46;
      const padY = 32;
      const top = 20;
      const max = maxValue > 0 ? maxValue : 1;
      const y = (value) => height - padY - ((value / max) * (height - top - padY));
      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${padX}" y1="${yPos}" x2="${width - padX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${padX - 8}" y="${yPos + 3}" text-anchor="end">${Math.round(value)}</text>`;
      }
      return { width, height, padX, padY, y, grid };
    };

    const xLabels = (points, frame, step) => points
      .map((point, index) => {
        if (index % step !== 0) {
          return '';
        }
        const x = frame.padX + index * (frame.width - frame.padX * 2) / Math.max(points.length - 1, 1);
        return `<text class="chart-label" x="${x}" y="${frame.height - frame.padY + 16}" text-anchor="middle">${point.label}</text>`;
      })
      .join('');

    const linePath = (points, frame) => {
      const step = (frame.width - frame.padX * 2) / Math.max(points.length - 1, 1);
      return points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${(frame.padX + index * step).toFixed(2)} ${frame.y(point.value).toFixed(2)}`)
        .join(' ');
    };

    const renderEmpty = () => {
      chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet. Add a submission or sync.</text>';
    };

    const renderMonth = () => {
      chartTitleEl.textContent = 'This month';
      const points = statsData.month.map((day) => ({ label: day.date.slice(8), value: day.total }));
      if (!points.length) {
        renderEmpty();
        return;
      }
      const frame = chartFrame(Math.max(...points.map((p) => p.value)));
      const slot = (frame.width - frame.padX * 2) / points.length;
      const barWidth = Math.max(slot * 0.6, 2);
      const bars = points
        .map((point, index) => {
          const x = frame.padX + index * slot + (slot - barWidth) / 2;
          const yPos = frame.y(point.value);
          return `<rect class="chart-bar" x="${x.toFixed(2)}" y="${yPos.toFixed(2)}" width="${barWidth.toFixed(2)}" height="${(frame.height - frame.padY - yPos).toFixed(2)}" />`;
        })
        .join('');
      chartEl.innerHTML = frame.grid + bars + xLabels(points, frame, points.length > 15 ? 2 : 1);
    };

    const renderHistory = () => {
      chartTitleEl.textContent = 'Daily submissions and 7-day average';
      const history = statsData.history;
      if (!history.length) {
        renderEmpty();
        return;
      }
      const daily = history.map((day) => ({ label: day.date.slice(5), value: day.total }));
      const frame = chartFrame(Math.max(...daily.map((p) => p.value)));
      const avg = history
        .map((day, index) => ({ index, value: day.rolling_avg }))
        .filter((p) => p.value !== null);
      const step = (frame.width - frame.padX * 2) / Math.max(daily.length - 1, 1);
      const avgPath = avg
        .map((p, i) => `${i === 0 ? 'M' : 'L'} ${(frame.padX + p.index * step).toFixed(2)} ${frame.y(p.value).toFixed(2)}`)
        .join(' ');
      chartEl.innerHTML = frame.grid
        + `<path class="chart-line" d="${linePath(daily, frame)}" />`
        + (avgPath ? `<path class="chart-line soft" d="${avgPath}" />` : '')
        + xLabels(daily, frame, Math.ceil(daily.length / 10));
    };

    const renderCumulative = () => {
      chartTitleEl.textContent = 'Cumulative submissions';
      const history = statsData.history;
      if (!history.length) {
        renderEmpty();
        return;
      }
      const points = history.map((day) => ({ label: day.date.slice(5), value: day.cumulative }));
      const peak = Math.max(points[points.length - 1].value, ...statsData.milestones);
      const frame = chartFrame(peak);
      const milestones = statsData.milestones
        .map((value) => {
          const yPos = frame.y(value);
          return `<line class="chart-milestone" x1="${frame.padX}" y1="${yPos}" x2="${frame.width - frame.padX}" y2="${yPos}" />`
            + `<text class="chart-label" x="${frame.width - frame.padX + 4}" y="${yPos + 3}">${value}</text>`;
        })
        .join('');
      chartEl.innerHTML = frame.grid + milestones
        + `<path class="chart-line" d="${linePath(points, frame)}" />`
        + xLabels(points, frame, Math.ceil(points.length / 10));
    };

    const renderActiveTab = () => {
      if (!statsData) {
        return;
      }
      if (activeTab === 'history') {
        renderHistory();
      } else if (activeTab === 'cumulative') {
        renderCumulative();
      } else {
        renderMonth();
      }
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => {
        const isActive = button.dataset.tab === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      renderActiveTab();
    };

    const renderBreakdown = (entries) => {
      breakdownEl.innerHTML = entries
        .map((entry) => {
          const width = entry.total > 0 ? Math.min((entry.solved / entry.total) * 100, 100) : 0;
          return `<div class="goal">`
            + `<div class="row"><span>${entry.difficulty}</span><span class="figure">${entry.solved} / ${entry.total}</span></div>`
            + `<div class="bar"><div class="fill" style="width: ${width}%"></div></div>`
            + `</div>`;
        })
        .join('');
    };

    const renderMissed = (data) => {
      if (!data.missed.length) {
        missedEl.innerHTML = `<li class="clear">Nothing missed in the last ${data.window_days} days</li>`;
        return;
      }
      missedEl.innerHTML = data.missed.map((date) => `<li>${date}</li>`).join('');
    };

    const loadProgress = async () => {
      const res = await fetch('/api/progress');
      if (!res.ok) {
        throw new Error('Unable to load progress');
      }
      updateProgress(await res.json());
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      statsData = await res.json();
      renderActiveTab();
    };

    const loadMissed = async () => {
      const res = await fetch('/api/missed');
      if (!res.ok) {
        throw new Error('Unable to load missed days');
      }
      renderMissed(await res.json());
    };

    const refresh = async () => {
      await Promise.all([loadProgress(), loadStats(), loadMissed()]);
    };

    document.getElementById('entry-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const count = Number(document.getElementById('count').value);
      setStatus('Saving...', '');
      try {
        const res = await fetch('/api/submissions', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ count })
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Request failed');
        }
        updateProgress(await res.json());
        await Promise.all([loadStats(), loadMissed()]);
        setStatus('Submission added', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('sync-btn').addEventListener('click', async () => {
      setStatus('Syncing...', '');
      try {
        const res = await fetch('/api/sync', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({})
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Sync failed');
        }
        const data = await res.json();
        renderBreakdown(data.breakdown);
        await refresh();
        setStatus(`Synced ${data.days_merged} day(s) for ${data.username}`, 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
