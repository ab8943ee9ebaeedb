//! Interactive, role-driven text menu.
//!
//! Generic over the input and output streams so tests can script a session.
//! Booking failures are printed and the loop continues; only I/O errors end
//! the session early. End of input behaves like choosing exit.

use super::print;
use slotbook::model::{ClientId, ProviderId, Role};
use slotbook::{BookingCoordinator, Result, SlotbookError};
use std::io::{BufRead, Write};

pub struct Menu<'a, R, W> {
    coordinator: &'a BookingCoordinator,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(coordinator: &'a BookingCoordinator, input: R, out: W) -> Self {
        Self {
            coordinator,
            input,
            out,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Choose a role:")?;
        writeln!(self.out, "1 - I am looking for a provider (customer)")?;
        writeln!(self.out, "2 - I am a provider (operator)")?;
        let role = match self.read_line()?.as_deref() {
            None => return Ok(()),
            Some("1") => Role::Customer,
            Some("2") => Role::Operator,
            Some(_) => {
                print::warning(&mut self.out, "Invalid choice.")?;
                return Ok(());
            }
        };

        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(());
        };
        let me = self.coordinator.register_client(&name, role);
        print::success(
            &mut self.out,
            &format!("Registered {} as {} (ID: {})", name, role, me),
        )?;

        loop {
            self.show_options(role)?;
            let choice = match self.read_line()? {
                Some(line) if line != "0" => line,
                _ => {
                    writeln!(self.out, "Goodbye.")?;
                    return Ok(());
                }
            };

            let outcome = match (role, choice.as_str()) {
                (Role::Customer, "1") => self.book_for(me),
                (Role::Customer, "2") => self.show_current(me),
                (Role::Customer, "3") => self.show_history(me),
                (Role::Customer, "4") => self.cancel_for(me),
                (Role::Operator, "1") => self.add_provider(),
                (Role::Operator, "2") => self.show_slots(),
                (Role::Operator, "3") => self.book_for_client(),
                (Role::Operator, "4") => self.cancel_for_client(),
                (_, "5") => self.list_providers(),
                _ => {
                    print::warning(&mut self.out, "Invalid choice.")?;
                    Ok(())
                }
            };

            match outcome {
                Err(SlotbookError::Io(e)) => return Err(SlotbookError::Io(e)),
                Err(e) => print::error(&mut self.out, &e)?,
                Ok(()) => {}
            }
        }
    }

    fn show_options(&mut self, role: Role) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Choose an action:")?;
        match role {
            Role::Customer => {
                writeln!(self.out, "1 - Book a slot")?;
                writeln!(self.out, "2 - Show current appointment")?;
                writeln!(self.out, "3 - Show appointment history")?;
                writeln!(self.out, "4 - Cancel an appointment")?;
            }
            Role::Operator => {
                writeln!(self.out, "1 - Add a provider")?;
                writeln!(self.out, "2 - Show a provider's slots")?;
                writeln!(self.out, "3 - Book a slot for a client")?;
                writeln!(self.out, "4 - Cancel a client's appointment")?;
            }
        }
        writeln!(self.out, "5 - List providers")?;
        writeln!(self.out, "0 - Exit")?;
        Ok(())
    }

    fn book_for(&mut self, client: ClientId) -> Result<()> {
        let Some(provider) = self.prompt_provider()? else {
            return Ok(());
        };
        let Some(slot) = self.prompt("Enter a slot (e.g. 11:00): ")? else {
            return Ok(());
        };
        let appt = self.coordinator.book(client, provider, &slot)?;
        let name = self.provider_name(appt.provider_id);
        print::success(
            &mut self.out,
            &format!("Booked {}", print::appointment_line(&appt, name.as_deref())),
        )?;
        Ok(())
    }

    fn cancel_for(&mut self, client: ClientId) -> Result<()> {
        let Some(slot) = self.prompt("Slot to cancel (blank for current): ")? else {
            return Ok(());
        };
        let appt = if slot.is_empty() {
            self.coordinator.cancel_current(client)?
        } else {
            self.coordinator.cancel(client, &slot)?
        };
        print::success(&mut self.out, &format!("Appointment at {} cancelled", appt.slot))?;
        Ok(())
    }

    fn show_current(&mut self, client: ClientId) -> Result<()> {
        match self.coordinator.current_appointment(client) {
            Some(appt) => {
                let name = self.provider_name(appt.provider_id);
                writeln!(
                    self.out,
                    "Your current appointment: {}",
                    print::appointment_line(&appt, name.as_deref())
                )?;
            }
            None => print::info(&mut self.out, "You have no active appointments.")?,
        }
        Ok(())
    }

    fn show_history(&mut self, client: ClientId) -> Result<()> {
        let history = self.coordinator.history(client);
        if history.is_empty() {
            print::info(&mut self.out, "Appointment history is empty.")?;
            return Ok(());
        }
        writeln!(self.out, "Appointment history:")?;
        for appt in &history {
            let name = self.provider_name(appt.provider_id);
            writeln!(self.out, "- {}", print::appointment_line(appt, name.as_deref()))?;
        }
        Ok(())
    }

    fn add_provider(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the provider's name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            return Err(SlotbookError::Input("Provider name cannot be empty".into()));
        }
        let id = self.coordinator.register_provider_with_defaults(&name)?;
        print::success(&mut self.out, &format!("Provider {} added with ID {}", name, id))?;
        Ok(())
    }

    fn show_slots(&mut self) -> Result<()> {
        let Some(provider) = self.prompt_provider()? else {
            return Ok(());
        };
        let view = self.coordinator.availability(provider)?;
        print::availability(&mut self.out, &view)?;
        Ok(())
    }

    fn book_for_client(&mut self) -> Result<()> {
        match self.prompt_client()? {
            Some(client) => self.book_for(client),
            None => Ok(()),
        }
    }

    fn cancel_for_client(&mut self) -> Result<()> {
        match self.prompt_client()? {
            Some(client) => self.cancel_for(client),
            None => Ok(()),
        }
    }

    fn list_providers(&mut self) -> Result<()> {
        let providers = self.coordinator.list_providers();
        print::providers(&mut self.out, &providers)?;
        Ok(())
    }

    fn provider_name(&self, id: ProviderId) -> Option<String> {
        self.coordinator.get_provider(id).ok().map(|p| p.name)
    }

    fn prompt_provider(&mut self) -> Result<Option<ProviderId>> {
        self.prompt_number("Enter the provider ID: ")
            .map(|n| n.map(ProviderId))
    }

    fn prompt_client(&mut self) -> Result<Option<ClientId>> {
        self.prompt_number("Enter the client ID: ")
            .map(|n| n.map(ClientId))
    }

    fn prompt_number<N: std::str::FromStr>(&mut self, label: &str) -> Result<Option<N>> {
        match self.prompt(label)? {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| SlotbookError::Input(format!("Not a valid ID: {}", raw))),
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
