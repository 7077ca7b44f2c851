use gloo::timers::callback::{Interval, Timeout};
use memorito_core as game;
use game::{
    CardIndex, Difficulty, FlipOutcome, GameSession, GameSummary, HighScoreTable, MatchOutcome,
    Theme,
};
use web_time::Instant;
use yew::prelude::*;

use crate::audio::{AudioPlayer, Sound};
use crate::background::Background;
use crate::utils::*;

/// Delay before a full selection is resolved, so the player can see both
/// faces.
const MATCH_CHECK_DELAY_MS: u32 = 600;
/// Delay before the victory modal, so the final match can render.
const VICTORY_DELAY_MS: u32 = 500;
const TICK_MS: u32 = 1000;

impl StorageKey for HighScoreTable {
    const KEY: &'static str = "memorito:scores";
}

pub(crate) trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: FlipOutcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<MatchOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: MatchOutcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<(), E> {
    fn has_update(self) -> bool {
        self.is_ok()
    }
}

const fn theme_class(theme: Theme) -> &'static str {
    use Theme::*;
    match theme {
        Classic => "theme-classic",
        Animals => "theme-animals",
        Food => "theme-food",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectDifficulty(Difficulty),
    SelectTheme(Theme),
    SelectBackground(Background),
    Play,
    CardClicked(CardIndex),
    ResolvePair,
    FinishGame,
    Tick,
    Pause,
    Resume,
    Restart,
    BackToMenu,
    ToggleMute,
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Forced shuffle seed from the location hash, random when absent.
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    scores: HighScoreTable,
    audio: AudioPlayer,
    background: Background,
    difficulty: Option<Difficulty>,
    theme: Option<Theme>,
    session: Option<GameSession>,
    summary: Option<GameSummary>,
    forced_seed: Option<u64>,
    prev_secs: u32,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MS, move || link.send_message(Msg::Tick))
    }

    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    fn in_menu(&self) -> bool {
        self.session
            .as_ref()
            .map_or(true, |session| session.phase().is_idle())
    }

    fn schedule(ctx: &Context<Self>, delay_ms: u32, msg: Msg) {
        let link = ctx.link().clone();
        Timeout::new(delay_ms, move || link.send_message(msg)).forget();
    }

    fn best_label(&self, difficulty: Difficulty) -> String {
        self.scores.best(difficulty).map_or_else(
            || "--".to_string(),
            |best| format!("{} moves - {}", best.moves, format_clock(best.time_secs)),
        )
    }

    fn view_welcome(&self, ctx: &Context<Self>) -> Html {
        let play_ready = self.difficulty.is_some() && self.theme.is_some();

        html! {
            <section class="welcome-screen">
                <h1>{"Memorito"}</h1>
                <div class="difficulty-options">
                    {
                        for Difficulty::ALL.map(|difficulty| {
                            let selected = self.difficulty == Some(difficulty);
                            let onclick = ctx.link().callback(move |_| Msg::SelectDifficulty(difficulty));
                            html! {
                                <button
                                    class={classes!("difficulty-btn", selected.then_some("selected"))}
                                    {onclick}
                                >
                                    {difficulty.label()}
                                </button>
                            }
                        })
                    }
                </div>
                <div class="theme-options">
                    {
                        for Theme::ALL.map(|theme| {
                            let selected = self.theme == Some(theme);
                            let onclick = ctx.link().callback(move |_| Msg::SelectTheme(theme));
                            html! {
                                <button
                                    class={classes!("difficulty-btn", selected.then_some("selected"))}
                                    {onclick}
                                >
                                    {theme.label()}
                                </button>
                            }
                        })
                    }
                </div>
                <div class="background-options">
                    {
                        for Background::ALL.map(|background| {
                            let selected = self.background == background;
                            let onclick = ctx.link().callback(move |_| Msg::SelectBackground(background));
                            html! {
                                <button
                                    class={classes!("difficulty-btn", selected.then_some("selected"))}
                                    {onclick}
                                >
                                    {background.label()}
                                </button>
                            }
                        })
                    }
                </div>
                <ul class="high-scores">
                    {
                        for Difficulty::ALL.map(|difficulty| html! {
                            <li>
                                <span>{difficulty.label()}</span>
                                <span>{self.best_label(difficulty)}</span>
                            </li>
                        })
                    }
                </ul>
                <button
                    class="play-btn"
                    disabled={!play_ready}
                    onclick={ctx.link().callback(|_| Msg::Play)}
                >
                    {"Play"}
                </button>
            </section>
        }
    }

    fn view_game(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let theme = session.theme();
        let grid_class = classes!(
            "memory-grid",
            session.difficulty().key(),
            theme_class(theme),
        );
        let elapsed = format_clock(session.elapsed_secs(Instant::now()));

        html! {
            <section class="game-screen">
                <header class="game-stats">
                    <span class="stat-moves">{session.move_count()}</span>
                    <span class="stat-timer">{elapsed}</span>
                    <span class="stat-pairs">
                        {format!("{}/{}", session.matched_pairs(), session.total_pairs())}
                    </span>
                    <span class="stat-combo">{format!("x{}", session.combo())}</span>
                    <button
                        class={classes!("sound-btn", self.audio.is_muted().then_some("muted"))}
                        onclick={ctx.link().callback(|_| Msg::ToggleMute)}
                    />
                    <button class="pause-btn" onclick={ctx.link().callback(|_| Msg::Pause)}>
                        {"Pause"}
                    </button>
                    <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Restart"}</button>
                    <button onclick={ctx.link().callback(|_| Msg::BackToMenu)}>{"Menu"}</button>
                </header>
                <div class={grid_class}>
                    {
                        for session.cards().iter().enumerate().map(|(index, card)| {
                            let index = index as CardIndex;
                            let face_up = card.state.is_face_up();
                            let matched = matches!(card.state, game::CardState::Matched);
                            let onclick = ctx.link().callback(move |_| Msg::CardClicked(index));
                            html! {
                                <div
                                    class={classes!(
                                        "memory-card",
                                        face_up.then_some("flipped"),
                                        matched.then_some("matched"),
                                    )}
                                    {onclick}
                                >
                                    <div class="card-face card-front"></div>
                                    <div class="card-face card-back">
                                        { face_up.then(|| theme.symbol_face(card.symbol)).unwrap_or_default() }
                                    </div>
                                </div>
                            }
                        })
                    }
                </div>
                { self.view_pause_modal(ctx, session) }
                { self.view_victory_modal(ctx, session) }
            </section>
        }
    }

    fn view_pause_modal(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        if !session.phase().is_paused() {
            return Html::default();
        }

        html! {
            <div class="modal pause-modal">
                <article>
                    <h2>{"Paused"}</h2>
                    <button onclick={ctx.link().callback(|_| Msg::Resume)}>{"Resume"}</button>
                    <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Restart"}</button>
                    <button onclick={ctx.link().callback(|_| Msg::BackToMenu)}>{"Menu"}</button>
                </article>
            </div>
        }
    }

    fn view_victory_modal(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        if !session.phase().is_finished() {
            return Html::default();
        }
        let Some(summary) = self.summary else {
            return Html::default();
        };

        html! {
            <div class="modal victory-modal">
                <article>
                    <h2>{"Victory!"}</h2>
                    {
                        summary.is_new_record.then(|| html! {
                            <p class="new-record">{"NEW RECORD!"}</p>
                        })
                    }
                    <p><strong>{"Time: "}</strong>{format_clock(summary.time_secs)}</p>
                    <p><strong>{"Moves: "}</strong>{summary.moves}</p>
                    <p><strong>{"Difficulty: "}</strong>{summary.difficulty.label()}</p>
                    <p><strong>{"Theme: "}</strong>{summary.theme.label()}</p>
                    <p><strong>{"Max combo: "}</strong>{format!("x{}", summary.max_combo)}</p>
                    <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Play again"}</button>
                    <button onclick={ctx.link().callback(|_| Msg::BackToMenu)}>{"Menu"}</button>
                </article>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            scores: LocalOrDefault::local_or_default(),
            audio: LocalOrDefault::local_or_default(),
            background: LocalOrDefault::local_or_default(),
            difficulty: None,
            theme: None,
            session: None,
            summary: None,
            forced_seed: ctx.props().seed,
            prev_secs: 0,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SelectDifficulty(difficulty) => {
                self.audio.play(Sound::Click);
                self.difficulty = Some(difficulty);
                true
            }
            SelectTheme(theme) => {
                self.audio.play(Sound::Click);
                self.theme = Some(theme);
                true
            }
            SelectBackground(background) => {
                self.audio.play(Sound::Click);
                self.background = background;
                Background::apply(background);
                true
            }
            Play => {
                let (Some(difficulty), Some(theme)) = (self.difficulty, self.theme) else {
                    return false;
                };
                self.audio.play(Sound::Click);
                self.summary = None;
                self.prev_secs = 0;
                self.session = Some(GameSession::new(
                    difficulty,
                    theme,
                    self.next_seed(),
                    Instant::now(),
                ));
                true
            }
            CardClicked(index) => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                match session.flip_card(index) {
                    Ok(outcome) if outcome.has_update() => {
                        self.audio.play(Sound::Flip);
                        if outcome.needs_resolution() {
                            Self::schedule(ctx, MATCH_CHECK_DELAY_MS, Msg::ResolvePair);
                        }
                        true
                    }
                    Ok(_) => false,
                    Err(err) => {
                        log::debug!("flip ignored: {}", err);
                        false
                    }
                }
            }
            ResolvePair => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                match session.resolve_pair() {
                    Ok(MatchOutcome::Matched) => {
                        self.audio.play(Sound::Match);
                        true
                    }
                    Ok(MatchOutcome::AllMatched) => {
                        self.audio.play(Sound::Match);
                        Self::schedule(ctx, VICTORY_DELAY_MS, Msg::FinishGame);
                        true
                    }
                    Ok(MatchOutcome::Mismatched) => {
                        self.audio.play(Sound::NoMatch);
                        true
                    }
                    _ => false,
                }
            }
            FinishGame => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                match session.finish(&mut self.scores, Instant::now()) {
                    Ok(summary) => {
                        self.audio.play(Sound::Victory);
                        if summary.is_new_record {
                            self.scores.local_save();
                        }
                        self.summary = Some(summary);
                        true
                    }
                    Err(err) => {
                        log::debug!("finish ignored: {}", err);
                        false
                    }
                }
            }
            Tick => {
                let Some(session) = self.session.as_ref() else {
                    return false;
                };
                // Phase guard: ticks landing after a pause, restart, or menu
                // return must not repaint.
                if !session.phase().is_active() {
                    return false;
                }
                let secs = session.elapsed_secs(Instant::now());
                if self.prev_secs != secs {
                    self.prev_secs = secs;
                    true
                } else {
                    false
                }
            }
            Pause => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                if session.pause(Instant::now()).has_update() {
                    self.audio.play(Sound::Click);
                    true
                } else {
                    false
                }
            }
            Resume => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                if session.resume(Instant::now()).has_update() {
                    self.audio.play(Sound::Click);
                    true
                } else {
                    false
                }
            }
            Restart => {
                let seed = self.next_seed();
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                self.audio.play(Sound::Click);
                self.summary = None;
                self.prev_secs = 0;
                session.restart(seed, Instant::now());
                true
            }
            BackToMenu => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                self.audio.play(Sound::Click);
                self.summary = None;
                session.back_to_menu();
                true
            }
            ToggleMute => {
                self.audio.toggle_mute();
                if !self.audio.is_muted() {
                    self.audio.play(Sound::Click);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="memorito">
                {
                    match (self.in_menu(), self.session.as_ref()) {
                        (false, Some(session)) => self.view_game(ctx, session),
                        _ => self.view_welcome(ctx),
                    }
                }
            </div>
        }
    }
}
