//! Console front end: prompts for stakes and actions, and prints what happens at the table.

use crate::interrupt::StatsBoard;
use blackjack_lib::prelude::*;
use std::fmt::{Arguments, Display};
use std::io::{self, BufRead, Write};

/// Input that could not be accepted. The prompt is shown again.
#[derive(Debug, PartialEq)]
pub enum InputError {
    InvalidStakeInput { balance: f64 },
    InvalidActionInput,
}

impl Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::InvalidStakeInput { balance } => write!(
                f,
                "Please enter a numeric value between 0 and {}.",
                to_currency(*balance)
            ),
            InputError::InvalidActionInput => {
                write!(f, "Please answer [S]tand/[S]tick, [H]it/[T]wist or [N]either.")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Formats an amount of money, e.g. `£1,234.50`.
pub fn to_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}£{}.{}", sign, grouped, fraction)
}

/// One line description of a player, used in every message about them.
pub fn describe_player(player: &Player) -> String {
    format!(
        "{} with {} cards. Balance: {}. Stake: {}",
        player,
        player.hand().len(),
        to_currency(player.balance),
        to_currency(player.stake)
    )
}

/// Formats a hand as a list of cards followed by its value.
pub fn format_hand(cards: &[Card]) -> String {
    let names = cards.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    format!("[{}] (value {})", names.join(", "), hand_value(cards))
}

/// Parses a stake, which must be a number in `[0, balance]`.
pub fn parse_stake(line: &str, balance: f64) -> Result<f64, InputError> {
    match line.trim().parse::<f64>() {
        Ok(stake) if stake.is_finite() && (0.0..=balance).contains(&stake) => Ok(stake),
        _ => Err(InputError::InvalidStakeInput { balance }),
    }
}

/// Only the first character counts, in either case: `s` stands, `h` or `t` hits, `n` does neither.
pub fn parse_action(line: &str) -> Result<PlayerAction, InputError> {
    match line.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('s') => Ok(PlayerAction::Stand),
        Some('h') | Some('t') => Ok(PlayerAction::Hit),
        Some('n') => Ok(PlayerAction::Neither),
        _ => Err(InputError::InvalidActionInput),
    }
}

/// Reads stakes and actions from `reader`, writing prompts to `writer`. Invalid answers are asked
/// again until a valid one arrives or the input ends.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        ConsoleInput { reader, writer }
    }

    fn prompt(&mut self, text: &str) -> Result<String, BlackjackGameError> {
        let mut line = Vec::new();
        let read = write!(self.writer, "{}", text)
            .and_then(|_| self.writer.flush())
            .and_then(|_| self.reader.read_until(b'\n', &mut line));
        match read {
            Ok(0) => {
                tracing::info!("input closed");
                Err(BlackjackGameError::InputClosed)
            }
            // bytes that are not utf-8 become replacement characters and fail to parse
            Ok(_) => Ok(String::from_utf8_lossy(&line)
                .trim_end_matches(['\r', '\n'])
                .to_string()),
            Err(e) => {
                tracing::error!(error = %e, "failed to read from the console");
                Err(BlackjackGameError::InputClosed)
            }
        }
    }

    fn say(&mut self, args: Arguments<'_>) -> Result<(), BlackjackGameError> {
        writeln!(self.writer, "{}", args).map_err(|e| {
            tracing::error!(error = %e, "failed to write to the console");
            BlackjackGameError::InputClosed
        })
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> PlayerInput for ConsoleInput<R, W> {
    fn stake(&mut self, player: &Player) -> Result<f64, BlackjackGameError> {
        self.say(format_args!(
            "Updating the stakes for {}.",
            describe_player(player)
        ))?;
        loop {
            let line = self.prompt("New stake: ")?;
            match parse_stake(&line, player.balance) {
                Ok(stake) => return Ok(stake),
                Err(e) => {
                    tracing::debug!(input = %line, "rejected stake");
                    self.say(format_args!("{}", e))?;
                }
            }
        }
    }

    fn action(&mut self, player: &Player) -> Result<PlayerAction, BlackjackGameError> {
        let question = format!(
            "Would {} like to [S]tand/[S]tick, [H]it/[T]wist or [N]either? > ",
            player
        );
        loop {
            let line = self.prompt(&question)?;
            match parse_action(&line) {
                Ok(action) => return Ok(action),
                Err(_) => tracing::debug!(input = %line, "rejected action"),
            }
        }
    }
}

/// Prints table events to `writer` and keeps the stats board up to date.
pub struct ConsoleDisplay<W> {
    writer: W,
    board: Option<StatsBoard>,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(writer: W) -> Self {
        ConsoleDisplay {
            writer,
            board: None,
        }
    }

    /// Publishes every stats snapshot to `board` as well.
    pub fn with_board(mut self, board: StatsBoard) -> Self {
        self.board = Some(board);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, args: Arguments<'_>) {
        if let Err(e) = writeln!(self.writer, "{}", args) {
            tracing::warn!(error = %e, "failed to write to the console");
        }
    }
}

impl<W: Write> TableObserver for ConsoleDisplay<W> {
    fn notify(&mut self, event: TableEvent<'_>) {
        match event {
            TableEvent::StakePlaced { player } => self.line(format_args!(
                "Updated the stakes for {}.",
                describe_player(player)
            )),
            TableEvent::CardDealt {
                recipient: Recipient::Dealer,
                card,
            } => self.line(format_args!("The dealer was dealt a {}.", card)),
            TableEvent::CardDealt { .. } => {}
            TableEvent::PlayerTurn { player } => {
                self.line(format_args!(
                    "{} has the following hand:",
                    describe_player(player)
                ));
                self.line(format_args!("\n{}\n", format_hand(player.hand())));
            }
            TableEvent::HandUpdated { player } => {
                self.line(format_args!("\n{}\n", format_hand(player.hand())))
            }
            TableEvent::DealerBust { dealer_value } => self.line(format_args!(
                "The dealer went bust with {}. All hands remunerated.",
                dealer_value
            )),
            TableEvent::DealerStands { dealer_value } => {
                self.line(format_args!("The dealer stands on {}.", dealer_value))
            }
            TableEvent::Blackjack { player } => self.line(format_args!(
                "{} got a natural Blackjack! Their balance has been increased by 2.5x.",
                describe_player(player)
            )),
            TableEvent::PlayerWon {
                player,
                player_value,
                dealer_value,
            } => self.line(format_args!(
                "{} fared better than the dealer (Player: {}, Dealer: {}) and is being remunerated.",
                describe_player(player),
                player_value,
                dealer_value
            )),
            TableEvent::PlayerLost {
                player,
                player_value,
                dealer_value,
            } => self.line(format_args!(
                "{} fared worse than the dealer (Player: {}, Dealer: {}) and is losing their wager.",
                describe_player(player),
                player_value,
                dealer_value
            )),
            TableEvent::PlayerEliminated { player } => self.line(format_args!(
                "{} has run out of money and leaves the table.",
                player
            )),
            TableEvent::Snapshot(summary) => {
                if let Some(board) = &self.board {
                    board.publish(summary);
                }
            }
        }
    }
}

/// Renders the stats as the aligned table or, with `json`, as pretty printed JSON.
pub fn render_summary(summary: &GameSummary, json: bool) -> String {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => return text,
            Err(e) => tracing::warn!(error = %e, "unable to serialize stats, printing the table"),
        }
    }
    summary.to_string()
}

/// Writes stats to stdout and flushes, used on the way out of the process.
pub fn print_summary(summary: &GameSummary, json: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render_summary(summary, json))?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn player(balance: f64) -> Player {
        Player::new(PlayerId(1), "Ada", balance)
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(to_currency(50.0), "£50.00");
        assert_eq!(to_currency(0.0), "£0.00");
        assert_eq!(to_currency(1234.5), "£1,234.50");
        assert_eq!(to_currency(1_000_000.0), "£1,000,000.00");
        assert_eq!(to_currency(-12.25), "-£12.25");
    }

    #[test]
    fn describe_player_shows_money() {
        let mut ada = player(50.0);
        ada.place_stake(10.0).unwrap();
        assert_eq!(
            describe_player(&ada),
            "Ada (#1) with 0 cards. Balance: £40.00. Stake: £10.00"
        );
    }

    #[test]
    fn stake_parsing() {
        assert_eq!(parse_stake("10", 50.0), Ok(10.0));
        assert_eq!(parse_stake(" 12.5 ", 50.0), Ok(12.5));
        assert_eq!(parse_stake("50", 50.0), Ok(50.0));
        assert_eq!(parse_stake("0", 50.0), Ok(0.0));
        let rejected = Err(InputError::InvalidStakeInput { balance: 50.0 });
        assert_eq!(parse_stake("50.01", 50.0), rejected);
        assert_eq!(parse_stake("-1", 50.0), rejected);
        assert_eq!(parse_stake("ten", 50.0), rejected);
        assert_eq!(parse_stake("NaN", 50.0), rejected);
        assert_eq!(parse_stake("", 50.0), rejected);
    }

    #[test]
    fn action_parsing() {
        assert_eq!(parse_action("s"), Ok(PlayerAction::Stand));
        assert_eq!(parse_action("Stick"), Ok(PlayerAction::Stand));
        assert_eq!(parse_action("H"), Ok(PlayerAction::Hit));
        assert_eq!(parse_action("twist"), Ok(PlayerAction::Hit));
        assert_eq!(parse_action("n"), Ok(PlayerAction::Neither));
        assert_eq!(parse_action(""), Err(InputError::InvalidActionInput));
        assert_eq!(parse_action("x"), Err(InputError::InvalidActionInput));
        assert_eq!(parse_action(" s"), Err(InputError::InvalidActionInput));
    }

    #[test]
    fn stake_prompt_repeats_until_valid() {
        let reader = Cursor::new("abc\n100\n10\n");
        let mut input = ConsoleInput::new(reader, Vec::new());

        assert_eq!(input.stake(&player(50.0)), Ok(10.0));

        let (_, written) = input.into_inner();
        let written = String::from_utf8(written).unwrap();
        assert_eq!(written.matches("New stake: ").count(), 3);
        assert_eq!(
            written
                .matches("Please enter a numeric value between 0 and £50.00.")
                .count(),
            2
        );
    }

    #[test]
    fn garbled_input_is_asked_again() {
        let reader = Cursor::new(b"\xff\xfe\n10\n".to_vec());
        let mut input = ConsoleInput::new(reader, Vec::new());
        assert_eq!(input.stake(&player(50.0)), Ok(10.0));

        let reader = Cursor::new(b"\xc3\n\xffs\nh\n".to_vec());
        let mut input = ConsoleInput::new(reader, Vec::new());
        assert_eq!(input.action(&player(50.0)), Ok(PlayerAction::Hit));

        let (_, written) = input.into_inner();
        let written = String::from_utf8(written).unwrap();
        assert_eq!(written.matches("Would Ada (#1) like to").count(), 3);
    }

    #[test]
    fn action_prompt_repeats_until_valid() {
        let reader = Cursor::new("\nx\nT\n");
        let mut input = ConsoleInput::new(reader, Vec::new());

        assert_eq!(input.action(&player(50.0)), Ok(PlayerAction::Hit));

        let (_, written) = input.into_inner();
        let written = String::from_utf8(written).unwrap();
        assert_eq!(written.matches("Would Ada (#1) like to").count(), 3);
    }

    #[test]
    fn closed_input_is_reported() {
        let mut input = ConsoleInput::new(Cursor::new("abc\n"), Vec::new());
        assert_eq!(
            input.stake(&player(50.0)),
            Err(BlackjackGameError::InputClosed)
        );
        let mut input = ConsoleInput::new(Cursor::new(""), Vec::new());
        assert_eq!(
            input.action(&player(50.0)),
            Err(BlackjackGameError::InputClosed)
        );
    }

    #[test]
    fn display_prints_events_and_publishes_snapshots() {
        let board = StatsBoard::default();
        let mut display = ConsoleDisplay::new(Vec::new()).with_board(board.clone());
        let mut ada = player(50.0);
        ada.receive_card("King of Spades".parse().unwrap());
        ada.receive_card("9 of Clubs".parse().unwrap());

        display.notify(TableEvent::CardDealt {
            recipient: Recipient::Dealer,
            card: "Ace of Hearts".parse().unwrap(),
        });
        display.notify(TableEvent::CardDealt {
            recipient: Recipient::Player(ada.id),
            card: "9 of Clubs".parse().unwrap(),
        });
        display.notify(TableEvent::PlayerTurn { player: &ada });
        display.notify(TableEvent::PlayerWon {
            player: &ada,
            player_value: 19,
            dealer_value: 17,
        });
        let summary = GameSummary {
            rounds_played: 1,
            cards_left: 40,
            players: vec![PlayerSummary::new(&ada, false)],
        };
        display.notify(TableEvent::Snapshot(summary.clone()));

        let written = String::from_utf8(display.into_inner()).unwrap();
        assert!(written.contains("The dealer was dealt a Ace of Hearts."));
        assert!(!written.contains("dealt a 9 of Clubs"));
        assert!(written.contains("[King of Spades, 9 of Clubs] (value 19)"));
        assert!(written.contains("fared better than the dealer (Player: 19, Dealer: 17)"));
        assert_eq!(board.latest(), Some(summary));
    }

    #[test]
    fn json_summary_renders() {
        let summary = GameSummary {
            rounds_played: 2,
            cards_left: 30,
            players: vec![PlayerSummary::new(&player(12.5), false)],
        };
        let json = render_summary(&summary, true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounds_played"], 2);
        assert_eq!(value["players"][0]["name"], "Ada");
        assert_eq!(value["players"][0]["balance"], 12.5);
        assert!(render_summary(&summary, false).contains("rounds played"));
    }
}
