//! The player's editable command sequence.

use serde::{Deserialize, Serialize};

use crate::{BlockId, simulator::CommandType};

/// Default cap on program length.
pub const DEFAULT_MAX_COMMANDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("Program already holds the maximum of {limit} commands")]
    Full { limit: usize },
    #[error("No block with id {0}")]
    NoSuchBlock(BlockId),
    #[error("Index {index} is out of range for a program of {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One instruction placed in the program. The id only matters for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: CommandType,
}

/// An ordered list of blocks with linear undo/redo.
///
/// Every successful edit snapshots the previous sequence. A new edit after an
/// undo discards the redo tail.
#[derive(Debug, Clone)]
pub struct Program {
    blocks: Vec<CommandBlock>,
    limit: usize,
    next_id: BlockId,
    history: Vec<Vec<CommandBlock>>,
    cursor: usize,
}

impl Default for Program {
    fn default() -> Self {
        Program::new(DEFAULT_MAX_COMMANDS)
    }
}

impl Program {
    pub fn new(limit: usize) -> Self {
        Program {
            blocks: Vec::new(),
            limit,
            next_id: 0,
            history: vec![Vec::new()],
            cursor: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.blocks.len() >= self.limit
    }

    pub fn blocks(&self) -> &[CommandBlock] {
        &self.blocks
    }

    /// The command types in order, ready for the simulator.
    pub fn commands(&self) -> Vec<CommandType> {
        self.blocks.iter().map(|block| block.kind).collect()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    fn commit(&mut self) {
        self.history.truncate(self.cursor + 1);
        self.history.push(self.blocks.clone());
        self.cursor = self.history.len() - 1;
    }

    fn position_of(&self, id: BlockId) -> Result<usize, ProgramError> {
        self.blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or(ProgramError::NoSuchBlock(id))
    }

    /// Appends a block and returns its id.
    pub fn add(&mut self, kind: CommandType) -> Result<BlockId, ProgramError> {
        if self.is_full() {
            return Err(ProgramError::Full { limit: self.limit });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.blocks.push(CommandBlock { id, kind });
        self.commit();
        Ok(id)
    }

    /// Swaps the command of an existing block, keeping its place.
    pub fn replace(&mut self, id: BlockId, kind: CommandType) -> Result<(), ProgramError> {
        let index = self.position_of(id)?;
        if self.blocks[index].kind != kind {
            self.blocks[index].kind = kind;
            self.commit();
        }
        Ok(())
    }

    pub fn remove(&mut self, id: BlockId) -> Result<CommandBlock, ProgramError> {
        let index = self.position_of(id)?;
        let block = self.blocks.remove(index);
        self.commit();
        Ok(block)
    }

    /// Removes the final block, if any.
    pub fn pop(&mut self) -> Option<CommandBlock> {
        let block = self.blocks.pop()?;
        self.commit();
        Some(block)
    }

    /// Moves the block at `from` so that it ends up at index `to`.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), ProgramError> {
        let len = self.blocks.len();
        for index in [from, to] {
            if index >= len {
                return Err(ProgramError::IndexOutOfRange { index, len });
            }
        }
        if from != to {
            let block = self.blocks.remove(from);
            self.blocks.insert(to, block);
            self.commit();
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.blocks.is_empty() {
            self.blocks.clear();
            self.commit();
        }
    }

    /// Steps back one edit. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.blocks = self.history[self.cursor].clone();
        true
    }

    /// Re-applies an undone edit. Returns `false` with nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.blocks = self.history[self.cursor].clone();
        true
    }
}
