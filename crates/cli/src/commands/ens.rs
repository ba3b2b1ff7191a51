use super::blockscout::select_network;
use super::Services;
use crate::session::TerminalSession;
use async_trait::async_trait;
use std::sync::Arc;
use w3t_console::{CommandHandler, CommandResult, OperationExt};
use w3t_explorer::{DomainInfo, ExplorerError, ExplorerNetwork};

/// `ens <name> [network]`
pub struct Ens {
    services: Arc<Services>,
}

impl Ens {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl CommandHandler<TerminalSession> for Ens {
    async fn call(&self, _session: &mut TerminalSession, args: &[String]) -> CommandResult {
        let Some(name) = args.first() else {
            return Ok("Please provide an ENS name. Usage: ens <name> [network]".to_string());
        };
        let network = match select_network(&self.services.networks, args.get(1)) {
            Ok(network) => network,
            Err(message) => return Ok(message),
        };

        match self.services.ens.domain(network.chain_id, name).await {
            Ok(domain) => Ok(format_domain(network, &domain)),
            Err(ExplorerError::Status { status, .. }) if status.as_u16() == 404 => {
                Ok(format!("ENS name '{name}' not found on {}.", network.name))
            }
            Err(err) => Err(err).operation("resolving ENS name"),
        }
    }
}

fn format_domain(network: &ExplorerNetwork, domain: &DomainInfo) -> String {
    let hash = |value: &Option<w3t_explorer::AddressRef>| {
        value
            .as_ref()
            .map(|address| address.hash.clone())
            .unwrap_or_else(|| "(none)".to_string())
    };
    let mut output = format!(
        "ENS Domain ({}):\nName: {}\nResolved Address: {}\nOwner: {}",
        network.name,
        domain.name,
        hash(&domain.resolved_address),
        hash(&domain.owner),
    );
    if domain.wrapped_owner.is_some() {
        output.push_str(&format!("\nWrapped Owner: {}", hash(&domain.wrapped_owner)));
    }
    if let Some(registered) = &domain.registration_date {
        output.push_str(&format!("\nRegistered: {registered}"));
    }
    if let Some(expires) = &domain.expiry_date {
        output.push_str(&format!("\nExpires: {expires}"));
    }
    output
}
