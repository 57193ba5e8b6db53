use colored::*;

use crate::terminal::colors;
use sweepr_common::network::host::HostRecord;

pub fn host_to_details(host: &HostRecord) -> Vec<(String, ColoredString)> {
    let name: ColoredString = match &host.hostname {
        Some(_) => host.display_name().color(colors::TEXT_DEFAULT),
        None => host.display_name().dimmed(),
    };

    vec![(String::from("Name"), name)]
}
