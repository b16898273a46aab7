/// Windows services offered before an agent's own list is known, as
/// (service name, display name), sorted by display name.
pub const DEFAULT_SERVICES: [(&str, &str); 274] = [
    ("MMS", "Acronis Managed Machine Service"),
    ("AxInstSV", "ActiveX Installer (AxInstSV)"),
    ("AarSvc_35b28a", "Agent Activation Runtime_35b28a"),
    ("AJRouter", "AllJoyn Router Service"),
    ("AppReadiness", "App Readiness"),
    ("AppIDSvc", "Application Identity"),
    ("Appinfo", "Application Information"),
    ("ALG", "Application Layer Gateway Service"),
    ("AppMgmt", "Application Management"),
    ("AppXSvc", "AppX Deployment Service (AppXSVC)"),
    ("AssignedAccessManagerSvc", "AssignedAccessManager Service"),
    ("tzautoupdate", "Auto Time Zone Updater"),
    ("BthAvctpSvc", "AVCTP service"),
    ("BITS", "Background Intelligent Transfer Service"),
    ("BrokerInfrastructure", "Background Tasks Infrastructure Service"),
    ("BFE", "Base Filtering Engine"),
    ("BDESVC", "BitLocker Drive Encryption Service"),
    ("wbengine", "Block Level Backup Engine Service"),
    ("BTAGService", "Bluetooth Audio Gateway Service"),
    ("bthserv", "Bluetooth Support Service"),
    ("BluetoothUserService_35b28a", "Bluetooth User Support Service_35b28a"),
    ("Bonjour Service", "Bonjour Service"),
    ("PeerDistSvc", "BranchCache"),
    ("camsvc", "Capability Access Manager Service"),
    ("CaptureService_35b28a", "CaptureService_35b28a"),
    ("autotimesvc", "Cellular Time"),
    ("CertPropSvc", "Certificate Propagation"),
    ("ClipSVC", "Client License Service (ClipSVC)"),
    ("cbdhsvc_35b28a", "Clipboard User Service_35b28a"),
    ("KeyIso", "CNG Key Isolation"),
    ("EventSystem", "COM+ Event System"),
    ("COMSysApp", "COM+ System Application"),
    ("CDPSvc", "Connected Devices Platform Service"),
    ("CDPUserSvc_35b28a", "Connected Devices Platform User Service_35b28a"),
    ("DiagTrack", "Connected User Experiences and Telemetry"),
    ("ConsentUxUserSvc_35b28a", "ConsentUX_35b28a"),
    ("PimIndexMaintenanceSvc_35b28a", "Contact Data_35b28a"),
    ("CoreMessagingRegistrar", "CoreMessaging"),
    ("VaultSvc", "Credential Manager"),
    ("CredentialEnrollmentManagerUserSvc_35b28a", "CredentialEnrollmentManagerUserSvc_35b28a"),
    ("CryptSvc", "Cryptographic Services"),
    ("DsSvc", "Data Sharing Service"),
    ("DusmSvc", "Data Usage"),
    ("DcomLaunch", "DCOM Server Process Launcher"),
    ("DoSvc", "Delivery Optimization"),
    ("DeviceAssociationService", "Device Association Service"),
    ("DeviceInstall", "Device Install Service"),
    ("DmEnrollmentSvc", "Device Management Enrollment Service"),
    ("dmwappushservice", "Device Management Wireless Application Protocol (WAP) Push message Routing Service"),
    ("DsmSvc", "Device Setup Manager"),
    ("DeviceAssociationBrokerSvc_35b28a", "DeviceAssociationBroker_35b28a"),
    ("DevicePickerUserSvc_35b28a", "DevicePicker_35b28a"),
    ("DevicesFlowUserSvc_35b28a", "DevicesFlow_35b28a"),
    ("DevQueryBroker", "DevQuery Background Discovery Broker"),
    ("Dhcp", "DHCP Client"),
    ("diagsvc", "Diagnostic Execution Service"),
    ("DPS", "Diagnostic Policy Service"),
    ("WdiServiceHost", "Diagnostic Service Host"),
    ("WdiSystemHost", "Diagnostic System Host"),
    ("DisplayEnhancementService", "Display Enhancement Service"),
    ("DispBrokerDesktopSvc", "Display Policy Service"),
    ("TrkWks", "Distributed Link Tracking Client"),
    ("MSDTC", "Distributed Transaction Coordinator"),
    ("Dnscache", "DNS Client"),
    ("MapsBroker", "Downloaded Maps Manager"),
    ("embeddedmode", "Embedded Mode"),
    ("EFS", "Encrypting File System (EFS)"),
    ("EntAppSvc", "Enterprise App Management Service"),
    ("Eaphost", "Extensible Authentication Protocol"),
    ("Fax", "Fax"),
    ("fhsvc", "File History Service"),
    ("fdPHost", "Function Discovery Provider Host"),
    ("FDResPub", "Function Discovery Resource Publication"),
    ("BcastDVRUserService_35b28a", "GameDVR and Broadcast User Service_35b28a"),
    ("lfsvc", "Geolocation Service"),
    ("GoogleChromeElevationService", "Google Chrome Elevation Service"),
    ("GraphicsPerfSvc", "GraphicsPerfSvc"),
    ("gpsvc", "Group Policy Client"),
    ("hns", "Host Network Service"),
    ("hidserv", "Human Interface Device Service"),
    ("HvHost", "HV Host Service"),
    ("vmickvpexchange", "Hyper-V Data Exchange Service"),
    ("vmicguestinterface", "Hyper-V Guest Service Interface"),
    ("vmicshutdown", "Hyper-V Guest Shutdown Service"),
    ("vmicheartbeat", "Hyper-V Heartbeat Service"),
    ("vmcompute", "Hyper-V Host Compute Service"),
    ("vmicvmsession", "Hyper-V PowerShell Direct Service"),
    ("vmicrdv", "Hyper-V Remote Desktop Virtualization Service"),
    ("vmictimesync", "Hyper-V Time Synchronization Service"),
    ("vmicvss", "Hyper-V Volume Shadow Copy Requestor"),
    ("IKEEXT", "IKE and AuthIP IPsec Keying Modules"),
    ("ibtsiva", "Intel Bluetooth Service"),
    ("cplspcon", "Intel(R) Content Protection HDCP Service"),
    ("cphs", "Intel(R) Content Protection HECI Service"),
    ("SharedAccess", "Internet Connection Sharing (ICS)"),
    ("iphlpsvc", "IP Helper"),
    ("IpxlatCfgSvc", "IP Translation Configuration Service"),
    ("PolicyAgent", "IPsec Policy Agent"),
    ("KtmRm", "KtmRm for Distributed Transaction Coordinator"),
    ("LxpSvc", "Language Experience Service"),
    ("lltdsvc", "Link-Layer Topology Discovery Mapper"),
    ("wlpasvc", "Local Profile Assistant Service"),
    ("LSM", "Local Session Manager"),
    ("LxssManager", "LxssManager"),
    ("LxssManagerUser_35b28a", "LxssManagerUser_35b28a"),
    ("Mesh Agent", "Mesh Agent background service"),
    ("MessagingService_35b28a", "MessagingService_35b28a"),
    ("diagnosticshub.standardcollector.service", "Microsoft (R) Diagnostics Hub Standard Collector Service"),
    ("wlidsvc", "Microsoft Account Sign-in Assistant"),
    ("AppVClient", "Microsoft App-V Client"),
    ("MSiSCSI", "Microsoft iSCSI Initiator Service"),
    ("NgcSvc", "Microsoft Passport"),
    ("NgcCtnrSvc", "Microsoft Passport Container"),
    ("swprv", "Microsoft Software Shadow Copy Provider"),
    ("smphost", "Microsoft Storage Spaces SMP"),
    ("InstallService", "Microsoft Store Install Service"),
    ("SmsRouter", "Microsoft Windows SMS Router Service."),
    ("NaturalAuthentication", "Natural Authentication"),
    ("Net Driver HPZ12", "Net Driver HPZ12"),
    ("NetTcpPortSharing", "Net.Tcp Port Sharing Service"),
    ("Netlogon", "Netlogon"),
    ("NcdAutoSetup", "Network Connected Devices Auto-Setup"),
    ("NcbService", "Network Connection Broker"),
    ("Netman", "Network Connections"),
    ("NcaSvc", "Network Connectivity Assistant"),
    ("netprofm", "Network List Service"),
    ("NlaSvc", "Network Location Awareness"),
    ("NetSetupSvc", "Network Setup Service"),
    ("nsi", "Network Store Interface Service"),
    ("nvagent", "Network Virtualization Service"),
    ("ose64", "Office 64 Source Engine"),
    ("CscService", "Offline Files"),
    ("ssh-agent", "OpenSSH Authentication Agent"),
    ("sshd", "OpenSSH SSH Server"),
    ("OpenVPNServiceInteractive", "OpenVPN Interactive Service"),
    ("OpenVPNServiceLegacy", "OpenVPN Legacy Service"),
    ("OpenVPNService", "OpenVPNService"),
    ("defragsvc", "Optimize drives"),
    ("WpcMonSvc", "Parental Controls"),
    ("SEMgrSvc", "Payments and NFC/SE Manager"),
    ("PNRPsvc", "Peer Name Resolution Protocol"),
    ("p2psvc", "Peer Networking Grouping"),
    ("p2pimsvc", "Peer Networking Identity Manager"),
    ("PerfHost", "Performance Counter DLL Host"),
    ("pla", "Performance Logs & Alerts"),
    ("PhoneSvc", "Phone Service"),
    ("PlugPlay", "Plug and Play"),
    ("Pml Driver HPZ12", "Pml Driver HPZ12"),
    ("PNRPAutoReg", "PNRP Machine Name Publication Service"),
    ("WPDBusEnum", "Portable Device Enumerator Service"),
    ("Power", "Power"),
    ("Spooler", "Print Spooler"),
    ("PrintNotify", "Printer Extensions and Notifications"),
    ("PrintWorkflowUserSvc_35b28a", "PrintWorkflow_35b28a"),
    ("wercplsupport", "Problem Reports and Solutions Control Panel Support"),
    ("PcaSvc", "Program Compatibility Assistant Service"),
    ("QWAVE", "Quality Windows Audio Video Experience"),
    ("RmSvc", "Radio Management Service"),
    ("TroubleshootingSvc", "Recommended Troubleshooting Service"),
    ("RasAuto", "Remote Access Auto Connection Manager"),
    ("RasMan", "Remote Access Connection Manager"),
    ("SessionEnv", "Remote Desktop Configuration"),
    ("Tssdis", "Remote Desktop Connection Broker"),
    ("TSGateway", "Remote Desktop Gateway"),
    ("TermServLicensing", "Remote Desktop Licensing"),
    ("RDMS", "Remote Desktop Management"),
    ("TermService", "Remote Desktop Services"),
    ("UmRdpService", "Remote Desktop Services UserMode Port Redirector"),
    ("RpcSs", "Remote Procedure Call (RPC)"),
    ("RpcLocator", "Remote Procedure Call (RPC) Locator"),
    ("RemoteRegistry", "Remote Registry"),
    ("RetailDemo", "Retail Demo Service"),
    ("RemoteAccess", "Routing and Remote Access"),
    ("RpcEptMapper", "RPC Endpoint Mapper"),
    ("salt-minion", "salt-minion"),
    ("seclogon", "Secondary Logon"),
    ("SstpSvc", "Secure Socket Tunneling Protocol Service"),
    ("SamSs", "Security Accounts Manager"),
    ("wscsvc", "Security Center"),
    ("SensorDataService", "Sensor Data Service"),
    ("SensrSvc", "Sensor Monitoring Service"),
    ("SensorService", "Sensor Service"),
    ("LanmanServer", "Server"),
    ("shpamsvc", "Shared PC Account Manager"),
    ("ShellHWDetection", "Shell Hardware Detection"),
    ("SCardSvr", "Smart Card"),
    ("ScDeviceEnum", "Smart Card Device Enumeration Service"),
    ("SCPolicySvc", "Smart Card Removal Policy"),
    ("SNMPTRAP", "SNMP Trap"),
    ("sppsvc", "Software Protection"),
    ("SharedRealitySvc", "Spatial Data Service"),
    ("svsvc", "Spot Verifier"),
    ("SSDPSRV", "SSDP Discovery"),
    ("StateRepository", "State Repository Service"),
    ("WiaRpc", "Still Image Acquisition Events"),
    ("StorSvc", "Storage Service"),
    ("TieringEngineService", "Storage Tiers Management"),
    ("OneSyncSvc_35b28a", "Sync Host_35b28a"),
    ("SynTPEnhService", "SynTPEnh Caller Service"),
    ("SysMain", "SysMain"),
    ("SENS", "System Event Notification Service"),
    ("SystemEventsBroker", "System Events Broker"),
    ("SgrmBroker", "System Guard Runtime Monitor Broker"),
    ("tacticalagent", "Tactical RMM Agent"),
    ("Schedule", "Task Scheduler"),
    ("lmhosts", "TCP/IP NetBIOS Helper"),
    ("TapiSrv", "Telephony"),
    ("Themes", "Themes"),
    ("TimeBrokerSvc", "Time Broker"),
    ("TabletInputService", "Touch Keyboard and Handwriting Panel Service"),
    ("UsoSvc", "Update Orchestrator Service"),
    ("upnphost", "UPnP Device Host"),
    ("UserDataSvc_35b28a", "User Data Access_35b28a"),
    ("UnistoreSvc_35b28a", "User Data Storage_35b28a"),
    ("UevAgentService", "User Experience Virtualization Service"),
    ("UserManager", "User Manager"),
    ("ProfSvc", "User Profile Service"),
    ("vds", "Virtual Disk"),
    ("VSS", "Volume Shadow Copy"),
    ("VacSvc", "Volumetric Audio Compositor Service"),
    ("WalletService", "WalletService"),
    ("WarpJITSvc", "WarpJITSvc"),
    ("TokenBroker", "Web Account Manager"),
    ("WebClient", "WebClient"),
    ("atashost", "WebEx Service Host for Support Center"),
    ("WFDSConMgrSvc", "Wi-Fi Direct Services Connection Manager Service"),
    ("Audiosrv", "Windows Audio"),
    ("AudioEndpointBuilder", "Windows Audio Endpoint Builder"),
    ("SDRSVC", "Windows Backup"),
    ("WbioSrvc", "Windows Biometric Service"),
    ("FrameServer", "Windows Camera Frame Server"),
    ("wcncsvc", "Windows Connect Now - Config Registrar"),
    ("Wcmsvc", "Windows Connection Manager"),
    ("Sense", "Windows Defender Advanced Threat Protection Service"),
    ("WdNisSvc", "Windows Defender Antivirus Network Inspection Service"),
    ("WinDefend", "Windows Defender Antivirus Service"),
    ("mpssvc", "Windows Defender Firewall"),
    ("WEPHOSTSVC", "Windows Encryption Provider Host Service"),
    ("WerSvc", "Windows Error Reporting Service"),
    ("Wecsvc", "Windows Event Collector"),
    ("EventLog", "Windows Event Log"),
    ("FontCache", "Windows Font Cache Service"),
    ("stisvc", "Windows Image Acquisition (WIA)"),
    ("wisvc", "Windows Insider Service"),
    ("msiserver", "Windows Installer"),
    ("LicenseManager", "Windows License Manager Service"),
    ("Winmgmt", "Windows Management Instrumentation"),
    ("WManSvc", "Windows Management Service"),
    ("WMPNetworkSvc", "Windows Media Player Network Sharing Service"),
    ("icssvc", "Windows Mobile Hotspot Service"),
    ("TrustedInstaller", "Windows Modules Installer"),
    ("spectrum", "Windows Perception Service"),
    ("perceptionsimulation", "Windows Perception Simulation Service"),
    ("WpnService", "Windows Push Notifications System Service"),
    ("WpnUserService_35b28a", "Windows Push Notifications User Service_35b28a"),
    ("PushToInstall", "Windows PushToInstall Service"),
    ("WinRM", "Windows Remote Management (WS-Management)"),
    ("WSearch", "Windows Search"),
    ("SecurityHealthService", "Windows Security Service"),
    ("W32Time", "Windows Time"),
    ("wuauserv", "Windows Update"),
    ("WaaSMedicSvc", "Windows Update Medic Service"),
    ("WinHttpAutoProxySvc", "WinHTTP Web Proxy Auto-Discovery Service"),
    ("dot3svc", "Wired AutoConfig"),
    ("WlanSvc", "WLAN AutoConfig"),
    ("wmiApSrv", "WMI Performance Adapter"),
    ("workfolderssvc", "Work Folders"),
    ("LanmanWorkstation", "Workstation"),
    ("WwanSvc", "WWAN AutoConfig"),
    ("XboxGipSvc", "Xbox Accessory Management Service"),
    ("XblAuthManager", "Xbox Live Auth Manager"),
    ("XblGameSave", "Xbox Live Game Save"),
    ("XboxNetApiSvc", "Xbox Live Networking Service"),
    ("YMC", "YMC"),
];
