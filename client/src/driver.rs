use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use engine::{Board, GameError, GameState, Mark, Move, Outcome, StateKey, TicTacToe};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tic_tac_toe_ai::{Agent, AgentConfig, Reward};

use crate::error::ClientError;
use crate::settings::PlayerKind;

const WIN_REWARD: Reward = 1.0;
const LOSS_REWARD: Reward = -1.0;

/// Source of moves for one side of the board.
pub enum Controller {
    Human,
    Bot(Agent),
}

impl Controller {
    pub fn new(kind: PlayerKind, config: AgentConfig, seed: Option<u64>) -> Self {
        match kind.agent_kind() {
            Some(agent) => Controller::Bot(agent.build(config, seed)),
            None => Controller::Human,
        }
    }

    fn is_learning(&self) -> bool {
        matches!(self, Controller::Bot(agent) if agent.is_learning())
    }
}

impl Display for Controller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Human => f.write_str("human"),
            Controller::Bot(agent) => write!(f, "{}", agent.kind()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    pub delay: Duration,
    pub random_start: bool,
    pub learn: bool,
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Mark::X) => self.x_wins += 1,
            Outcome::Win(Mark::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

impl Display for Tally {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X wins: {}, O wins: {}, draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}

/// A move made by a bot, kept until the game ends.
struct Transition {
    mark: Mark,
    state: StateKey,
    action: Move,
}

/// Runs games between two controllers, printing the board after every move.
pub struct Session<R, W> {
    game: TicTacToe,
    x: Controller,
    o: Controller,
    input: R,
    output: W,
    options: SessionOptions,
    rng: StdRng,
    history: Vec<Transition>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(x: Controller, o: Controller, input: R, output: W, options: SessionOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            game: TicTacToe::default(),
            x,
            o,
            input,
            output,
            options,
            rng,
            history: Vec::new(),
        }
    }

    pub fn play(&mut self, games: usize) -> Result<Tally, ClientError> {
        let mut tally = Tally::default();
        for i in 0..games {
            debug!("starting game {}", i + 1);
            tally.record(self.play_game()?);
        }
        info!("{} vs {}: {}", self.x, self.o, tally);
        Ok(tally)
    }

    pub fn play_game(&mut self) -> Result<Outcome, ClientError> {
        self.history.clear();
        let first = if self.options.random_start && self.rng.gen_bool(0.5) {
            Mark::O
        } else {
            Mark::X
        };
        self.game.reset(first);
        if self.options.random_start && first == Mark::X {
            self.random_opening()?;
        }
        writeln!(self.output, "{}\n", self.game.board())?;

        let outcome = loop {
            let mark = match self.game.state() {
                GameState::Turn(mark) => mark,
                GameState::Finished(outcome) => break outcome,
            };
            let state = self.game.board().state_key();
            let mv = self.next_move(mark)?;
            self.game.update(mark, mv)?;
            if self.controller(mark).is_learning() {
                self.history.push(Transition {
                    mark,
                    state,
                    action: mv,
                });
            }
            writeln!(self.output, "{} -> {}\n{}\n", mark, mv, self.game.board())?;
        };
        writeln!(self.output, "{}", outcome)?;
        debug!("game over: {}", outcome);
        if self.options.learn {
            self.learn(outcome);
        }
        Ok(outcome)
    }

    fn controller(&self, mark: Mark) -> &Controller {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    fn random_opening(&mut self) -> Result<(), ClientError> {
        let moves = self.game.board().available_moves();
        let mv = *moves.choose(&mut self.rng).ok_or(ClientError::NoMove(Mark::X))?;
        debug!("random opening on {}", mv);
        self.game.update(Mark::X, mv)?;
        Ok(())
    }

    fn next_move(&mut self, mark: Mark) -> Result<Move, ClientError> {
        let delay = self.options.delay;
        let board = self.game.board();
        let controller = match mark {
            Mark::X => &mut self.x,
            Mark::O => &mut self.o,
        };
        match controller {
            Controller::Human => read_move(&mut self.input, &mut self.output, board, mark),
            Controller::Bot(agent) => {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                agent
                    .select_move(board, mark)
                    .ok_or(ClientError::NoMove(mark))
            }
        }
    }

    /// Replays the bot moves of the finished game backwards through the Q-table.
    /// Only the last move of each side is rewarded.
    fn learn(&mut self, outcome: Outcome) {
        let final_state = self.game.board().state_key();
        for mark in [Mark::X, Mark::O] {
            let mut reward = match outcome.winner() {
                Some(winner) if winner == mark => WIN_REWARD,
                Some(_) => LOSS_REWARD,
                None => 0.0,
            };
            let transitions: Vec<&Transition> =
                self.history.iter().filter(|t| t.mark == mark).collect();
            let controller = match mark {
                Mark::X => &mut self.x,
                Mark::O => &mut self.o,
            };
            let Controller::Bot(agent) = controller else {
                continue;
            };

            let mut next_state = final_state;
            for transition in transitions.into_iter().rev() {
                agent.observe(&transition.state, transition.action, reward, &next_state);
                next_state = transition.state;
                reward = 0.0;
            }
        }
    }
}

fn parse_move(line: &str) -> Result<Move, ClientError> {
    let values: Vec<usize> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| ClientError::invalid_input(line))?;
    let [row, col] = values[..] else {
        return Err(ClientError::invalid_input(line));
    };
    Ok(Move::try_from((row, col))?)
}

fn read_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
    mark: Mark,
) -> Result<Move, ClientError> {
    let mut line = String::new();
    loop {
        write!(output, "{} move (row col): ", mark)?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(ClientError::EndOfInput);
        }
        match parse_move(&line) {
            Ok(mv) if board.get(mv).is_none() => return Ok(mv),
            Ok(mv) => writeln!(output, "{}", GameError::cell_is_occupied(mv.row(), mv.col()))?,
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}
