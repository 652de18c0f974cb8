use crate::utils::*;
use clap::Args;
use flipmatch_core as game;
use game::{CardIndex, ClickOutcome, MatchOutcome};
use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

const TICK_MILLIS: u32 = 1000;

fn time_label(secs: u32) -> String {
    format!("Time: {}s", secs)
}

fn moves_label(moves: u32) -> String {
    format!("Moves: {}", moves)
}

fn grid_class(columns: game::Columns) -> Classes {
    classes!("fixed-grid", format!("has-{}-cols", columns))
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: CardIndex,
    card: game::Card,
    #[prop_or_default]
    matched: bool,
    #[prop_or_default]
    on_click: Option<Callback<CardIndex>>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        card,
        matched,
        on_click,
    } = props.clone();

    let class = classes!(
        "card",
        card.is_flipped().then_some("flipped"),
        matched.then_some("matched")
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        if let Some(on_click) = &on_click {
            on_click.emit(index);
        }
    });

    html! {
        <div class="cell">
            <div {class} data-name={card.name().to_owned()} {onclick}>
                <div class="card-inner">
                    <div class="card-front"/>
                    <div class="card-back">
                        <img src={card.img().to_owned()} alt={card.name().to_owned()}/>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct BoardProps {
    pub board: game::Board,
    #[prop_or_default]
    pub matched: Vec<CardIndex>,
    /// Receives card clicks, clicks are dropped while unset
    #[prop_or_default]
    pub on_card_click: Option<Callback<CardIndex>>,
}

#[function_component(BoardView)]
pub(crate) fn board_component(props: &BoardProps) -> Html {
    let columns = props.board.columns();
    log::trace!("render board: {} cards in {} columns", props.board.len(), columns);

    html! {
        <div class={grid_class(columns)}>
            <div id="game-board" class="grid">
                {
                    for props.board.cards().iter().enumerate().map(|(index, card)| {
                        let card = card.clone();
                        let matched = props.matched.contains(&index);
                        let on_click = props.on_card_click.clone();
                        html! {
                            <CardView key={index} {index} {card} {matched} {on_click}/>
                        }
                    })
                }
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct EndgameProps {
    summary: game::GameSummary,
    on_close: Callback<()>,
}

#[function_component(EndgameModal)]
fn endgame_component(props: &EndgameProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <Modal id="endgame-modal" on_close={props.on_close.clone()}>
            <h2 class="title">{"Well done!"}</h2>
            <p id="modal-time">{time_label(props.summary.elapsed_secs)}</p>
            <p id="modal-moves">{moves_label(props.summary.move_count)}</p>
            <button id="modal-close-button" class="button" onclick={close}>{"Close"}</button>
        </Modal>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct MemoryProps {
    /// How long two flipped cards stay face up, in milliseconds (350 to 3000)
    #[arg(long, default_value = "1000")]
    pub flip_duration: String,

    /// Force a shuffle seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(CardIndex),
    CheckMatch(game::SessionId),
    Tick,
    NewGame,
    CloseModal,
}

pub(crate) struct MemoryView {
    game: game::MemoryGame,
    modal_open: bool,
    timer_interval: Option<Interval>,
    pending_check: Option<Timeout>,
}

impl MemoryView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick))
    }

    fn stop_timer(&mut self) {
        if self.timer_interval.take().is_some() {
            log::debug!("timer stopped at {}s", self.game.elapsed_secs());
        }
    }

    fn schedule_check(&mut self, ctx: &Context<Self>, session: game::SessionId, after: game::FlipDuration) {
        let link = ctx.link().clone();
        log::trace!("match check in {}", after);
        self.pending_check = Some(Timeout::new(after.as_millis(), move || {
            link.send_message(Msg::CheckMatch(session))
        }));
    }

    fn click_card(&mut self, ctx: &Context<Self>, index: CardIndex) -> bool {
        match self.game.handle_card_click(index) {
            Ok(ClickOutcome::CheckScheduled { session, after }) => {
                self.schedule_check(ctx, session, after);
                true
            }
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::error!("card click {}: {}", index, err);
                false
            }
        }
    }

    fn check_match(&mut self, session: game::SessionId) -> bool {
        self.pending_check = None;
        match self.game.check_for_match(session) {
            MatchOutcome::Won => {
                self.stop_timer();
                self.modal_open = true;
                true
            }
            outcome => outcome.has_update(),
        }
    }

    fn new_game(&mut self, ctx: &Context<Self>) {
        self.stop_timer();
        self.pending_check = None;
        self.modal_open = false;
        self.game.reset_game(js_random_seed());
        self.timer_interval = Some(Self::create_timer(ctx));
    }
}

impl Component for MemoryView {
    type Message = Msg;
    type Properties = MemoryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let (flip_duration, err) = game::FlipDuration::or_fallback(&props.flip_duration);
        if let Some(err) = err {
            gloo::dialogs::alert(&err.to_string());
        }
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("new memory game, seed: {}, flip duration: {}", seed, flip_duration);

        let board = game::Board::from_faces(game::default_deck());
        Self {
            game: game::MemoryGame::new(board, flip_duration, seed),
            modal_open: false,
            timer_interval: Some(MemoryView::create_timer(ctx)),
            pending_check: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClicked(index) => self.click_card(ctx, index),
            CheckMatch(session) => self.check_match(session),
            Tick => self.game.tick(),
            NewGame => {
                self.new_game(ctx);
                true
            }
            CloseModal => std::mem::take(&mut self.modal_open),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let state = self.game.state();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_card_click = ctx.link().callback(CardClicked);
        let cb_close = ctx.link().callback(|()| CloseModal);

        html! {
            <div class={classes!("flipmatch", state.accepts_clicks().then_some("playable"))}>
                <nav class="level">
                    <aside class="level-item">{time_label(self.game.elapsed_secs())}</aside>
                    <span class="level-item">
                        <button id="restart-button" class="button" onclick={cb_new_game}>{"Restart"}</button>
                    </span>
                    <aside class="level-item">{moves_label(self.game.move_count())}</aside>
                </nav>
                <BoardView
                    board={self.game.board().clone()}
                    matched={self.game.matched().to_vec()}
                    on_card_click={Some(cb_card_click)}
                />
                if self.modal_open {
                    if let Some(summary) = self.game.summary() {
                        <EndgameModal {summary} on_close={cb_close}/>
                    }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_show_units() {
        assert_eq!(time_label(42), "Time: 42s");
        assert_eq!(moves_label(7), "Moves: 7");
    }

    #[test]
    fn grid_class_names_column_count() {
        let board = game::Board::from_faces(game::default_deck());
        assert_eq!(grid_class(board.columns()), classes!("fixed-grid", "has-6-cols"));
    }
}
