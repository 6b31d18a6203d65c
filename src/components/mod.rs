// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Interactive UI components.
//!
//! * [`queue`]: the queue popover, mirroring the player's queue.
//! * [`selection_list`]: the filterable id-keyed lists backing the browser
//!   panes.

pub(crate) mod queue;
pub(crate) mod selection_list;

pub(crate) use queue::QueueView;
pub(crate) use selection_list::SelectionList;
